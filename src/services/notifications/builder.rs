//! Backend construction from parsed addresses.
//!
//! One exhaustive match maps every registered schema token to its backend
//! family, deriving the family's typed config from the descriptor. A
//! missing required field surfaces as a typed construction error the
//! dispatcher can log and skip.

use super::descriptor::AddressDescriptor;
use super::error::NotifyResult;
use super::growl_provider::{GrowlConfig, GrowlProvider};
use super::json_provider::{JsonConfig, JsonProvider};
use super::provider::NotificationProvider;
use super::prowl_provider::{ProwlConfig, ProwlProvider};
use super::pushalot_provider::{PushalotConfig, PushalotProvider};
use super::pushbullet_provider::{PushBulletConfig, PushBulletProvider};
use super::pushover_provider::{PushoverConfig, PushoverProvider};
use super::schema::Schema;
use super::toasty_provider::{ToastyConfig, ToastyProvider};
use super::xbmc_provider::{XbmcConfig, XbmcProvider};

/// Builds the backend instance for a resolved schema.
///
/// `include_image` comes from the notification payload and is folded into
/// every config alongside the descriptor's own fields.
pub fn build_provider(
    schema: Schema,
    descriptor: &AddressDescriptor,
    include_image: bool,
) -> NotifyResult<Box<dyn NotificationProvider>> {
    Ok(match schema {
        Schema::Growl => Box::new(GrowlProvider::new(GrowlConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Prowl => Box::new(ProwlProvider::new(ProwlConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Palot => Box::new(PushalotProvider::new(PushalotConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Pbul => Box::new(PushBulletProvider::new(PushBulletConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Pover => Box::new(PushoverProvider::new(PushoverConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Toasty => Box::new(ToastyProvider::new(ToastyConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
        Schema::Xbmc | Schema::Xbmcs | Schema::Kodi | Schema::Kodis => Box::new(
            XbmcProvider::new(XbmcConfig::from_descriptor(descriptor, include_image)?),
        ),
        Schema::Json | Schema::Jsons => Box::new(JsonProvider::new(JsonConfig::from_descriptor(
            descriptor,
            include_image,
        )?)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;
    use crate::services::notifications::error::NotifyError;

    fn build(address: &str, include_image: bool) -> NotifyResult<Box<dyn NotificationProvider>> {
        let descriptor = parse_address(address, "unknown").unwrap();
        let schema = Schema::from_token(&descriptor.schema).expect("registered schema");
        build_provider(schema, &descriptor, include_image)
    }

    #[test]
    fn test_every_family_constructs() {
        for address in [
            "growl://host",
            "prowl://apikey",
            "palot://token",
            "pbul://token",
            "pover://user@token",
            "toasty://device",
            "xbmc://host",
            "kodis://host",
            "json://host",
        ] {
            assert!(build(address, false).is_ok(), "{address}");
        }
    }

    #[test]
    fn test_family_sharing_across_tokens() {
        for address in ["xbmc://h", "xbmcs://h", "kodi://h", "kodis://h"] {
            assert_eq!(build(address, false).unwrap().name(), "xbmc");
        }
        for address in ["json://h", "jsons://h"] {
            assert_eq!(build(address, false).unwrap().name(), "json");
        }
    }

    #[test]
    fn test_missing_required_field_is_construction_error() {
        let err = build("pover://token", false).err().expect("should fail");
        assert!(matches!(err, NotifyError::Construction { .. }));
    }
}
