//! The page-load pass on its own

use std::path::Path;

use crate::context::{Context, write_page};
use crate::error::Result;

pub fn run_render(context: &Context, page: &Path, output: Option<&Path>) -> Result<()> {
    let controller = context.start(page)?;
    write_page(controller.document(), output)
}
