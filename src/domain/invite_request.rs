//! src/domain/invite_request.rs

/// Raw invite form as it arrives on the wire.
///
/// Every field is defaulted so that an absent field deserializes instead of
/// failing in the extractor; presence is checked by `InviteRequest::try_from`,
/// which is where the user-facing rejection messages come from. The checkbox
/// arrives as `"1"` when ticked and is absent otherwise.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct InviteForm {
    #[serde(default)]
    pub coc: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fname: String,
    #[serde(default)]
    pub lname: String,
    #[serde(default, rename = "g-recaptcha-response")]
    pub captcha_token: String,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InviteRejection {
    #[error("Missing email")]
    MissingEmail,
    #[error("Missing first name")]
    MissingFirstName,
    #[error("Missing last name")]
    MissingLastName,
    #[error("You need to accept the code of conduct")]
    CodeOfConductNotAccepted,
}

/// An invite submission that passed the presence checks.
#[derive(Debug, PartialEq)]
pub struct InviteRequest {
    email: String,
    first_name: String,
    last_name: String,
    captcha_token: String,
}

impl InviteRequest {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn captcha_token(&self) -> &str {
        &self.captcha_token
    }
}

impl TryFrom<InviteForm> for InviteRequest {
    type Error = InviteRejection;

    fn try_from(form: InviteForm) -> Result<Self, Self::Error> {
        if form.email.is_empty() {
            return Err(InviteRejection::MissingEmail);
        }
        if form.fname.is_empty() {
            return Err(InviteRejection::MissingFirstName);
        }
        if form.lname.is_empty() {
            return Err(InviteRejection::MissingLastName);
        }
        if form.coc != "1" {
            return Err(InviteRejection::CodeOfConductNotAccepted);
        }

        Ok(Self {
            email: form.email,
            first_name: form.fname,
            last_name: form.lname,
            captcha_token: form.captcha_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use claim::{assert_err, assert_ok};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Word;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;
    use quickcheck_macros::quickcheck;

    use super::{InviteForm, InviteRejection, InviteRequest};

    fn filled_form() -> InviteForm {
        InviteForm {
            coc: "1".into(),
            email: "jane@example.com".into(),
            fname: "Jane".into(),
            lname: "Doe".into(),
            captcha_token: "tok123".into(),
        }
    }

    #[test]
    fn a_fully_filled_form_is_accepted() {
        assert_ok!(InviteRequest::try_from(filled_form()));
    }

    #[test]
    fn a_missing_email_is_rejected_first() {
        let form = InviteForm {
            email: "".into(),
            fname: "".into(),
            ..filled_form()
        };

        assert_eq!(
            InviteRequest::try_from(form),
            Err(InviteRejection::MissingEmail),
        );
    }

    #[test]
    fn a_missing_first_name_is_rejected() {
        let form = InviteForm {
            fname: "".into(),
            ..filled_form()
        };

        assert_eq!(
            InviteRequest::try_from(form),
            Err(InviteRejection::MissingFirstName),
        );
    }

    #[test]
    fn a_missing_last_name_is_rejected() {
        let form = InviteForm {
            lname: "".into(),
            ..filled_form()
        };

        assert_eq!(
            InviteRequest::try_from(form),
            Err(InviteRejection::MissingLastName),
        );
    }

    #[test]
    fn an_unticked_code_of_conduct_box_is_rejected() {
        for coc in ["", "0", "true", "yes"] {
            let form = InviteForm {
                coc: coc.into(),
                ..filled_form()
            };

            assert_eq!(
                InviteRequest::try_from(form),
                Err(InviteRejection::CodeOfConductNotAccepted),
                "coc value {:?} should not count as acceptance",
                coc,
            );
        }
    }

    #[test]
    fn an_empty_captcha_token_is_not_checked_here() {
        // Token validity is the verifier's call, not a presence rule.
        let form = InviteForm {
            captcha_token: "".into(),
            ..filled_form()
        };

        assert_ok!(InviteRequest::try_from(form));
    }

    #[test]
    fn rejection_messages_match_the_responses_served_to_users() {
        assert_eq!(InviteRejection::MissingEmail.to_string(), "Missing email");
        assert_eq!(
            InviteRejection::MissingFirstName.to_string(),
            "Missing first name",
        );
        assert_eq!(
            InviteRejection::MissingLastName.to_string(),
            "Missing last name",
        );
        assert_eq!(
            InviteRejection::CodeOfConductNotAccepted.to_string(),
            "You need to accept the code of conduct",
        );
    }

    #[derive(Debug, Clone)]
    struct AcceptableFormFixture(InviteForm);

    impl quickcheck::Arbitrary for AcceptableFormFixture {
        fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
            Self(InviteForm {
                coc: "1".into(),
                email: SafeEmail().fake_with_rng(g),
                fname: FirstName().fake_with_rng(g),
                lname: LastName().fake_with_rng(g),
                captcha_token: Word().fake_with_rng(g),
            })
        }
    }

    #[quickcheck]
    fn any_form_with_all_fields_present_is_accepted(form: AcceptableFormFixture) -> bool {
        InviteRequest::try_from(form.0).is_ok()
    }

    #[test]
    fn an_empty_form_reports_the_email_before_anything_else() {
        let form = InviteForm {
            coc: "".into(),
            email: "".into(),
            fname: "".into(),
            lname: "".into(),
            captcha_token: "".into(),
        };

        assert_err!(InviteRequest::try_from(form.clone()));
        assert_eq!(
            InviteRequest::try_from(form),
            Err(InviteRejection::MissingEmail),
        );
    }
}
