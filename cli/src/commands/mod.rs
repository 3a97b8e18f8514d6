mod generate;

pub use generate::RiscvOpcodes;
