pub mod definition;
pub mod host;
pub mod item;
pub mod logging;
pub mod settings;
pub mod source;

pub use definition::{Definition, DefinitionError, DefinitionRecord, StartPosition};
pub use host::{HostError, HostRuntime, LuaTreesitterHost, ReplayError, ReplayHost, TreesitterHost};
pub use item::{ActionData, Context, Item, Params};
pub use settings::SourceSettings;
pub use source::{DefinitionSource, GatherStream, SOURCE_KIND, SOURCE_NAME, Source};
