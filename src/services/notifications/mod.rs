//! Push-notification routing with pluggable providers.
//!
//! One notification payload fans out to any number of heterogeneous push
//! services, each addressed by a compact `schema://...` descriptor. The
//! pipeline is: list splitter → descriptor parser → schema registry →
//! typed backend construction → best-effort delivery via the dispatcher.

mod builder;
mod descriptor;
mod dispatcher;
mod error;
mod growl_provider;
mod json_provider;
mod provider;
mod prowl_provider;
mod pushalot_provider;
mod pushbullet_provider;
mod pushover_provider;
mod schema;
mod toasty_provider;
mod xbmc_provider;

pub use builder::build_provider;
pub use descriptor::{AddressDescriptor, parse_address, split_path_list, split_server_list};
pub use dispatcher::{DEFAULT_SCHEMA, DispatchReport, Dispatcher, TargetOutcome, TargetStatus};
pub use error::{NotifyError, NotifyResult};
pub use growl_provider::{GrowlConfig, GrowlProvider};
pub use json_provider::{JsonConfig, JsonProvider};
pub use provider::{
    NOTIFY_IMAGE_URL, NotificationPayload, NotificationProvider, NotificationResult,
};
pub use prowl_provider::{ProwlConfig, ProwlProvider};
pub use pushalot_provider::{PushalotConfig, PushalotProvider};
pub use pushbullet_provider::{PushBulletConfig, PushBulletProvider};
pub use pushover_provider::{PushoverConfig, PushoverProvider};
pub use schema::Schema;
pub use toasty_provider::{ToastyConfig, ToastyProvider};
pub use xbmc_provider::{XbmcConfig, XbmcProvider};
