mod central_panel;
mod tools_panel;

pub use central_panel::{central_panel, status_bar};
pub use tools_panel::tools_panel;
