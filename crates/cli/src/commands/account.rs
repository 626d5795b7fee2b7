use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Deserialize;
use storefront::forms::{PhoneNumber, PostcodeResult, SignUpForm};
use storefront_app::{context::AppContext, controllers::AuthMode};

use crate::{
    commands::{read_yaml, sign_in},
    config::Credentials,
    errors::{CliError, report},
};

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(flatten)]
    credentials: Credentials,

    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Print the profile
    Show,

    /// Apply changes from a YAML file
    Update {
        /// YAML file with the fields to change
        file: PathBuf,
    },
}

/// Profile changes; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
struct ProfileChanges {
    name: Option<String>,
    postcode: Option<PostcodeResult>,
    address_detail: Option<String>,
    phone: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct SignUpArgs {
    /// YAML file with the sign-up form
    file: PathBuf,
}

pub(crate) async fn profile(context: &AppContext, command: ProfileCommand) -> Result<(), CliError> {
    sign_in(context, &command.credentials).await?;

    let mut controller = context.profile_controller();

    controller.load().await?;

    if let ProfileSubcommand::Update { file } = command.command {
        let changes: ProfileChanges = read_yaml(&file).await?;

        if let Some(postcode) = &changes.postcode {
            controller.apply_postcode(postcode);
        }

        let form = controller.form_mut();

        if let Some(name) = changes.name {
            form.contact.name = name;
        }

        if let Some(detail) = changes.address_detail {
            form.contact.address_detail = detail;
        }

        if let Some(phone) = changes.phone {
            form.contact.phone = PhoneNumber::parse(&phone);
        }

        if let Some(password) = changes.password {
            form.confirm_password.clone_from(&password);
            form.password = password;
        }

        report(controller.submit().await)?;
    }

    let form = controller.form();

    println!("email:   {}", form.email);
    println!("name:    {}", form.contact.name);
    println!("zip:     {}", form.contact.zip_code);
    println!(
        "address: {} {}",
        form.contact.address, form.contact.address_detail
    );
    println!("phone:   {}", form.contact.phone);

    Ok(())
}

pub(crate) async fn sign_up(context: &AppContext, args: SignUpArgs) -> Result<(), CliError> {
    let form: SignUpForm = read_yaml(&args.file).await?;

    let mut controller = context.auth_controller();
    controller.set_mode(AuthMode::SignUp);
    *controller.sign_up_form_mut() = form;

    report(controller.submit().await)?;

    if let Some(user) = context.client.sessions().user().await {
        println!("signed up as {}", user.email.unwrap_or_default());
    }

    Ok(())
}
