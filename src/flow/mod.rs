pub mod definition;
pub mod prompt;
pub mod registry;
pub mod template;

pub use definition::{Flow, FlowBody};
pub use prompt::PromptSpec;
pub use registry::{FlowCatalogEntry, FlowRegistry};
pub use template::PromptTemplate;
