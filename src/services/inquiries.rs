//! Inquiries left by visitors asking to be contacted about a course.
use serde::Deserialize;

use crate::{
    db::{
        self,
        models::user_ask::{UserAsk, UserAskInsert},
    },
    utils::mobile::MobileNumber,
};

/// Longest accepted visitor name, in characters.
const NAME_MAX_LENGTH: usize = 20;
/// Longest accepted course name, in characters.
const COURSE_NAME_MAX_LENGTH: usize = 50;

/// The inquiry form as submitted.
#[derive(Deserialize, Default, Debug)]
pub struct InquiryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub course_name: String,
}

impl InquiryForm {
    /// Check every field and build the INSERT model.
    pub fn validate(&self) -> Result<UserAskInsert, errors::InquiryError> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > NAME_MAX_LENGTH {
            return Err(errors::InquiryError::InvalidField("name"));
        }
        let course_name = self.course_name.trim();
        if course_name.is_empty() || course_name.chars().count() > COURSE_NAME_MAX_LENGTH {
            return Err(errors::InquiryError::InvalidField("course_name"));
        }
        let mobile = MobileNumber::try_from(self.mobile.trim())
            .map_err(|()| errors::InquiryError::InvalidField("mobile"))?;
        Ok(UserAskInsert::new(name, mobile, course_name))
    }
}

/// Validate and store an inquiry.
pub async fn add_inquiry(
    form: &InquiryForm,
    db_conn: &db::ConnectionPool,
) -> Result<UserAsk, errors::InquiryError> {
    let insert = form.validate()?;
    tracing::debug!(name = insert.name(), course = insert.course_name(), "Storing inquiry");
    Ok(insert.store(db_conn).await?)
}

pub mod errors {
    use crate::db::errors::DatabaseError;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum InquiryError {
        #[error(transparent)]
        DatabaseError(#[from] DatabaseError),
        #[error("Inquiry field {0} is missing or invalid.")]
        InvalidField(&'static str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn form(name: &str, mobile: &str, course_name: &str) -> InquiryForm {
        InquiryForm {
            name: name.to_owned(),
            mobile: mobile.to_owned(),
            course_name: course_name.to_owned(),
        }
    }

    #[test]
    fn complete_form_validates() {
        let insert = form(" Zhang San ", "13812345678", "Rust basics").validate().unwrap();
        assert_eq!(insert.name(), "Zhang San");
        assert_eq!(insert.course_name(), "Rust basics");
    }

    #[test]
    fn each_field_is_checked() {
        assert_matches!(
            form("", "13812345678", "Rust").validate(),
            Err(errors::InquiryError::InvalidField("name"))
        );
        assert_matches!(
            form(&"x".repeat(21), "13812345678", "Rust").validate(),
            Err(errors::InquiryError::InvalidField("name"))
        );
        assert_matches!(
            form("Zhang", "13812345678", &"y".repeat(51)).validate(),
            Err(errors::InquiryError::InvalidField("course_name"))
        );
        assert_matches!(
            form("Zhang", "12345", "Rust").validate(),
            Err(errors::InquiryError::InvalidField("mobile"))
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(form(&"张".repeat(20), "13812345678", "Rust").validate().is_ok());
    }
}
