use std::fs;
use std::path::PathBuf;

use riscv_codegen::{generate, Backend, CodegenError, GenerateOptions, GeneratedBy, INSTR_DICT_FILE};
use riscv_encoding::{Instruction, InstructionDictionary};

fn out_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("riscv-codegen-{test}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn options(test: &str, extensions: &[&str]) -> GenerateOptions {
    let mut options =
        GenerateOptions::new(extensions.iter().map(|e| e.to_string()).collect(), out_dir(test))
            .with_backends(Backend::ALL);
    options.format = false;
    options.generated_by = GeneratedBy::new("riscv-opcodes rv_i rv_zihintpause");
    options
}

fn table() -> InstructionDictionary {
    InstructionDictionary::from_instructions([
        Instruction::new("add", "0000000----------000-----0110011", &["rd", "rs1", "rs2"])
            .with_extension("rv_i"),
        Instruction::new("mul", "0000001----------000-----0110011", &["rd", "rs1", "rs2"])
            .with_extension("rv_m"),
        Instruction::new(
            "fence",
            "-----------------000-----0001111",
            &["fm", "pred", "succ", "rs1", "rd"],
        )
        .with_extension("rv_i"),
        Instruction::new("pause", "00000001000000000000000000001111", &[])
            .with_extension("rv_zihintpause")
            .with_pseudo_of("fence"),
    ])
    .unwrap()
}

#[test]
fn test_generates_every_file() {
    let options = options("all", &["rv_i", "rv_zihintpause"]);
    let written = generate(&table(), &options).unwrap();

    assert_eq!(written.len(), Backend::ALL.len() + 1);
    assert_eq!(written[0], options.out_dir.join(INSTR_DICT_FILE));
    for (path, backend) in written[1..].iter().zip(Backend::ALL) {
        assert_eq!(path, &options.out_dir.join(backend.file_name()));
        assert!(path.exists(), "{} missing", path.display());
    }

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_persisted_dictionary_is_valid_input() {
    let options = options("persist", &["rv_i"]);
    generate(&table(), &options).unwrap();

    let json = fs::read_to_string(options.out_dir.join(INSTR_DICT_FILE)).unwrap();
    let persisted = InstructionDictionary::from_json(&json).unwrap();
    assert_eq!(persisted.names().collect::<Vec<_>>(), ["add", "fence"]);
    assert!(!json.contains("\"match\""));

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_c_header_keeps_emitted_pseudo_ops() {
    let options = options("pseudo", &["rv_i", "rv_zihintpause"]);
    generate(&table(), &options).unwrap();

    let header = fs::read_to_string(options.out_dir.join(Backend::C.file_name())).unwrap();
    assert!(header.contains("#define MATCH_PAUSE 0x100000f\n"));

    let rust = fs::read_to_string(options.out_dir.join(Backend::Rust.file_name())).unwrap();
    assert!(!rust.contains("PAUSE"));
    assert!(rust.contains("pub const MATCH_ADD: u32 = 0x33;"));
    assert!(!rust.contains("MUL"));

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_include_pseudo() {
    let mut options = options("include-pseudo", &["rv*"]);
    options.include_pseudo = true;
    options.backends = vec![Backend::Rust];
    generate(&table(), &options).unwrap();

    let rust = fs::read_to_string(options.out_dir.join(Backend::Rust.file_name())).unwrap();
    assert!(rust.contains("MATCH_PAUSE"));
    assert!(rust.contains("MATCH_MUL"));

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_formatters_are_best_effort() {
    // Succeeds whether or not gofmt and rustfmt are installed
    let mut options = options("format", &["rv_i"]);
    options.format = true;
    options.backends = vec![Backend::Go, Backend::Rust];
    let written = generate(&table(), &options).unwrap();

    assert_eq!(written.len(), 3);
    let rust = fs::read_to_string(options.out_dir.join(Backend::Rust.file_name())).unwrap();
    assert!(rust.contains("MATCH_ADD"));
    let go = fs::read_to_string(options.out_dir.join(Backend::Go.file_name())).unwrap();
    assert!(go.contains("AADD"));

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_unknown_field_stops_the_run() {
    let mut table = table();
    table
        .insert(
            Instruction::new("bad", "0000000----------111-----0110011", &["rd", "rq", "rs2"])
                .with_extension("rv_i"),
        )
        .unwrap();

    let mut options = options("unknown-field", &["rv_i"]);
    options.backends = vec![Backend::Latex, Backend::Rust, Backend::CoreDsl];
    let err = generate(&table, &options).unwrap_err();
    assert!(matches!(err, CodegenError::Encoding(_)));

    // Backends run in fixed order: Rust succeeded, CoreDSL failed, LaTeX never ran
    assert!(options.out_dir.join(INSTR_DICT_FILE).exists());
    assert!(options.out_dir.join(Backend::Rust.file_name()).exists());
    assert!(!options.out_dir.join(Backend::CoreDsl.file_name()).exists());
    assert!(!options.out_dir.join(Backend::Latex.file_name()).exists());

    let _ = fs::remove_dir_all(&options.out_dir);
}

#[test]
fn test_unwritable_output_is_fatal() {
    let blocker = out_dir("blocked");
    fs::write(&blocker, "not a directory").unwrap();

    let mut options = options("blocked-unused", &["rv_i"]);
    options.out_dir = blocker.clone();
    let err = generate(&table(), &options).unwrap_err();
    assert!(matches!(err, CodegenError::Io { .. }));

    let _ = fs::remove_file(&blocker);
}
