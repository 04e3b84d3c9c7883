//! Turning raw manifest declarations into the constant set
//!
//! 1. **Resolution** - qualify each `android:name` against its namespace
//! 2. **Aggregation** - drop duplicates across modules, first one wins
//! 3. **Naming** - derive a unique constant identifier per class

mod aggregator;
mod naming;
mod resolver;

pub use aggregator::{Aggregator, ConstantEntry, GenerationResult};
pub use naming::{constant_name, qualified_constant_name};
pub use resolver::{effective_namespace, is_identifier, is_qualified_name, resolve_class_name};
