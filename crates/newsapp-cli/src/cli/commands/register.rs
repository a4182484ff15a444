//! `register` command handler.

use anyhow::Result;
use newsapp_core::api::NewsClient;
use newsapp_core::forms::{FieldValue, SignupForm};
use newsapp_core::submission::{
    REGISTRATION_SUCCESS, SubmissionState, SubmitError, submit_registration,
};

use super::validation_report;
use crate::cli::RegisterArgs;

/// Builds the signup form the same way the interactive page does.
///
/// # Errors
/// Returns an error for a `--preference` that is not one of the listed
/// options.
fn build_form(args: RegisterArgs) -> Result<SignupForm> {
    let mut form = SignupForm::new();
    form.set_field(FieldValue::Email(args.email));
    form.set_field(FieldValue::Password(args.password));
    form.set_field(FieldValue::FullName(args.full_name));

    for category in args.categories {
        if !form.state().categories.contains(&category) {
            form.toggle_category(category);
        }
    }

    for preference in &args.preferences {
        if !form.preference_options().contains(preference) {
            anyhow::bail!(
                "Unknown preference '{preference}'. Use --custom-preference to add your own."
            );
        }
        if !form.state().preferences.contains(preference) {
            form.toggle_preference(preference);
        }
    }

    for custom in &args.custom_preferences {
        form.add_custom_option(custom);
    }

    Ok(form)
}

pub async fn run(client: &NewsClient, args: RegisterArgs) -> Result<()> {
    let form = build_form(args)?;

    let mut state = SubmissionState::default();
    match submit_registration(client, &form, &mut state).await {
        Ok(_) => {
            println!("{REGISTRATION_SUCCESS}");
            Ok(())
        }
        Err(SubmitError::Validation(errors)) => anyhow::bail!(validation_report(&errors)),
        Err(err) => {
            let message = state
                .failure_message()
                .map_or_else(|| err.to_string(), str::to_string);
            anyhow::bail!(message)
        }
    }
}
