mod cdp;
mod download;
mod driver;
mod error;
mod selector;
mod session;

pub use cdp::CdpDriver;
pub use driver::{DownloadedFile, PortalDriver};
pub use error::{Error, Result};
pub use selector::Target;
pub use session::{BrowserSession, LaunchOptions};
