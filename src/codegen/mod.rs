mod kotlin;

pub use kotlin::{write_atomically, KotlinEmitter, GENERATED_HEADER};
