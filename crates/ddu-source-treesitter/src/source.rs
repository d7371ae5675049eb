use futures::{
    StreamExt,
    stream::{self, LocalBoxStream},
};
use tracing::{debug, warn};

use crate::{
    host::{HostError, TreesitterHost},
    item::{Context, Item, Params},
};

pub const SOURCE_NAME: &str = "treesitter";
/// Picker kind whose actions consume the emitted [`crate::ActionData`].
pub const SOURCE_KIND: &str = "file";

/// Lazy, finite sequence of item batches produced by one gather call.
pub type GatherStream<'a> = LocalBoxStream<'a, Result<Vec<Item>, HostError>>;

/// Contract between the picker framework and a data source.
pub trait Source {
    type Params;

    fn name(&self) -> &'static str;

    fn kind(&self) -> &'static str;

    fn gather(
        &self,
        context: Context,
    ) -> GatherStream<'_>;

    fn params(&self) -> Self::Params;
}

/// Lists the tree-sitter definitions of the active buffer.
///
/// Stateless: every gather issues its own plugin, parser and definitions
/// queries, strictly one after another.
#[derive(Debug, Clone)]
pub struct DefinitionSource<H> {
    host: H,
}

impl<H: TreesitterHost> DefinitionSource<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run the queries for `context` and build its single batch.
    ///
    /// A missing plugin or parser yields an empty batch, not an error.
    /// Records that cannot become items are logged and skipped.
    pub async fn collect_items(
        &self,
        context: &Context,
    ) -> Result<Vec<Item>, HostError> {
        if !self.host.is_plugin_installed().await? {
            debug!("[gather] tree-sitter plugin is not installed");
            return Ok(Vec::new());
        }

        let buf_nr = context.buf_nr;

        if !self.host.is_parser_installed(buf_nr).await? {
            debug!("[gather] no parser for buffer {buf_nr}");
            return Ok(Vec::new());
        }

        let records = self.host.get_definitions(buf_nr).await?;
        let total = records.len();
        let items: Vec<Item> = records
            .into_iter()
            .filter_map(|record| match record.into_item(buf_nr) {
                Ok(item) => Some(item),
                Err(error) => {
                    warn!("[gather] skipping definition in buffer {buf_nr}: {error}");
                    None
                },
            })
            .collect();

        debug!("[gather] buffer {buf_nr}: {} items from {total} definitions", items.len());
        Ok(items)
    }
}

impl<H: TreesitterHost> Source for DefinitionSource<H> {
    type Params = Params;

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn kind(&self) -> &'static str {
        SOURCE_KIND
    }

    fn gather(
        &self,
        context: Context,
    ) -> GatherStream<'_> {
        stream::once(async move { self.collect_items(&context).await }).boxed_local()
    }

    fn params(&self) -> Params {
        Params::default()
    }
}
