use std::ffi::OsStr;
use std::fs;

use clap::Parser;
use riscv_opcodes_cli::commands::RiscvOpcodes;

const TABLE: &str = r#"{
  "sub": {
    "encoding": "0100000----------000-----0110011",
    "variable_fields": ["rd", "rs1", "rs2"],
    "extension": ["rv_i"]
  },
  "add": {
    "encoding": "0000000----------000-----0110011",
    "variable_fields": ["rd", "rs1", "rs2"],
    "extension": ["rv_i"],
    "match": "0x33",
    "mask": "0xfe00707f"
  },
  "mul": {
    "encoding": "0000001----------000-----0110011",
    "variable_fields": ["rd", "rs1", "rs2"],
    "extension": ["rv_m"]
  }
}"#;

#[test]
fn test_generate_from_table_file() {
    let dir = std::env::temp_dir().join(format!("riscv-opcodes-cli-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("instr_table.json");
    fs::write(&input, TABLE).unwrap();
    let out_dir = dir.join("out");

    let cli = RiscvOpcodes::try_parse_from([
        OsStr::new("riscv-opcodes"),
        OsStr::new("--input"),
        input.as_os_str(),
        OsStr::new("--out-dir"),
        out_dir.as_os_str(),
        OsStr::new("--sverilog"),
        OsStr::new("--rust"),
        OsStr::new("--no-format"),
        OsStr::new("rv_i"),
    ])
    .unwrap();
    cli.run().unwrap();

    let rust = fs::read_to_string(out_dir.join("inst.rs")).unwrap();
    let add = rust.find("pub const MATCH_ADD: u32 = 0x33;").unwrap();
    let sub = rust.find("pub const MATCH_SUB: u32 = 0x40000033;").unwrap();
    assert!(add < sub);
    assert!(!rust.contains("MUL"));

    assert!(out_dir.join("inst.sverilog").exists());
    assert!(out_dir.join("instr_dict.json").exists());
    assert!(!out_dir.join("inst.go").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_out_dir() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = std::env::temp_dir().join(format!("riscv-opcodes-cli-os-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("instr_table.json");
    fs::write(&input, TABLE).unwrap();
    let out_dir = dir.join(OsString::from_vec(b"out\xff".to_vec()));

    let cli = RiscvOpcodes::try_parse_from([
        OsStr::new("riscv-opcodes"),
        OsStr::new("--input"),
        input.as_os_str(),
        OsStr::new("--out-dir"),
        out_dir.as_os_str(),
        OsStr::new("--rust"),
        OsStr::new("--no-format"),
        OsStr::new("rv_i"),
    ])
    .unwrap();
    cli.run().unwrap();

    assert!(out_dir.join("inst.rs").exists());

    let _ = fs::remove_dir_all(&dir);
}
