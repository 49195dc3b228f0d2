use std::fmt;

use serde::{Deserialize, Serialize};

use agency_core::ServiceError;

use super::{DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use crate::validate;

/// Defines a catalog entry: a uniquely named value with a free-form
/// description that other records point to.
macro_rules! catalog_entry {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
        #[serde(rename_all = "camelCase")]
        pub struct $ty {
            #[serde(default)]
            pub id: String,

            /// Unique within the type.
            pub name: String,

            #[serde(default)]
            pub description: String,

            #[serde(default)]
            pub created_at: String,

            #[serde(default)]
            pub updated_at: String,
        }

        impl $ty {
            pub fn normalize(&mut self) {
                validate::trim(&mut self.name);
                validate::trim(&mut self.description);
            }

            pub fn validate(&self) -> Result<(), ServiceError> {
                validate::required("name", &self.name, NAME_MAX_LEN)?;
                validate::max_len("description", &self.description, DESCRIPTION_MAX_LEN)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.name)
            }
        }
    };
}

catalog_entry!(
    /// TopicPage: subject of a web page (sports, news, ...).
    TopicPage
);

catalog_entry!(
    /// Category: what an ad is about.
    Category
);

catalog_entry!(
    /// AdType: the format of an ad (banner, video, ...).
    AdType
);
