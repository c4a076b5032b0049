//! Command execution

use auth::AuthOutcome;
use auth::domain::value_object::credentials::Credentials;
use catalog::ExtensionFilter;
use catalog::ExtensionForm;
use catalog::models::{ExtensionVersionCreateDto, FlagCreateDto};

use crate::context::{CliError, Context};
use crate::output;
use crate::{Cli, Command, ExtensionsSubcommand, FormArgs, ListArgs, VersionsSubcommand};

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let context = Context::open(&cli.base_url, &cli.state_dir)?;

    match cli.command {
        Command::Login { username, password } => login(&context, &username, &password).await,
        Command::Register {
            username,
            password,
            confirm_password,
        } => register(&context, &username, &password, &confirm_password).await,
        Command::Logout => {
            if !context.store().is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            context.gateway().logout();
            println!("Signed out");
            Ok(())
        }
        Command::Whoami { remote } => whoami(&context, remote).await,
        Command::Extensions(cmd) => extensions(&context, cmd.command).await,
        Command::Versions(cmd) => versions(&context, cmd.command).await,
        Command::Tags { with_count } => tags(&context, with_count).await,
    }
}

// ============================================================================
// Session
// ============================================================================

async fn login(context: &Context, username: &str, password: &str) -> Result<(), CliError> {
    Credentials::login_form(username, password)?;

    let outcome = context.gateway().login(username, password).await;
    signed_in(context, outcome)
}

async fn register(
    context: &Context,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CliError> {
    Credentials::register_form(username, password, confirm_password)?;

    let outcome = context.gateway().register(username, password).await;
    signed_in(context, outcome)
}

fn signed_in(context: &Context, outcome: AuthOutcome) -> Result<(), CliError> {
    if !outcome.success {
        return Err(CliError::Failed(outcome.error.unwrap_or_default()));
    }
    println!("{}", output::signed_in(&context.session()?));
    Ok(())
}

async fn whoami(context: &Context, remote: bool) -> Result<(), CliError> {
    let session = context.session()?;
    if !remote {
        println!("{}", output::session(&session));
        return Ok(());
    }

    let user = context.auth_api().current_user(&session.token).await?;
    println!("{}", output::json(&user));
    Ok(())
}

// ============================================================================
// Catalog
// ============================================================================

fn filter(args: ListArgs) -> ExtensionFilter {
    ExtensionFilter {
        search_term: args.search,
        uploader_id: args.uploader,
        tag_ids: args.tags,
        sort_by: args.sort_by,
        sort_descending: args.descending,
        page_number: args.page,
        page_size: args.page_size,
    }
}

fn form(args: FormArgs) -> ExtensionForm {
    ExtensionForm {
        name: args.name,
        description: args.description,
        tag_ids: args.tags,
    }
}

async fn extensions(context: &Context, command: ExtensionsSubcommand) -> Result<(), CliError> {
    let catalog = context.catalog();

    match command {
        ExtensionsSubcommand::List(args) => {
            let page = catalog.list_extensions(&filter(args)).await?;
            println!("{}", output::extension_page(&page));
        }
        ExtensionsSubcommand::Show { id } => {
            let extension = catalog.get_extension(&id).await?;
            println!("{}", output::extension(&extension));
        }
        ExtensionsSubcommand::Create(args) => {
            let dto = form(args).into_create(context.session()?.user_id)?;
            let extension = catalog.create_extension(&dto).await?;
            println!("Created {} ({})", extension.name, extension.id);
        }
        ExtensionsSubcommand::Update { id, form: args } => {
            context.session()?;
            let dto = form(args).into_update()?;
            println!("{}", catalog.update_extension(&id, &dto).await?);
        }
        ExtensionsSubcommand::Delete { id } => {
            context.session()?;
            println!("{}", catalog.delete_extension(&id).await?);
        }
        ExtensionsSubcommand::Flag { id, reason } => {
            let dto = FlagCreateDto {
                extension_id: id.clone(),
                user_id: context.session()?.user_id,
                reason,
            };
            println!("{}", catalog.flag_extension(&id, &dto).await?);
        }
    }
    Ok(())
}

async fn versions(context: &Context, command: VersionsSubcommand) -> Result<(), CliError> {
    let catalog = context.catalog();

    match command {
        VersionsSubcommand::List { extension_id } => {
            let versions = catalog.list_versions(&extension_id).await?;
            println!("{}", output::versions(&versions));
        }
        VersionsSubcommand::Create {
            extension_id,
            name,
            descriptor,
            description,
            history,
            dependencies,
        } => {
            context.session()?;
            let dto = ExtensionVersionCreateDto {
                extension_id: extension_id.clone(),
                version_name: name,
                version_descriptor: descriptor,
                description,
                history,
                dependencies,
            };
            let version = catalog.create_version(&extension_id, &dto).await?;
            println!("Created version {} ({})", version.version_name, version.id);
        }
    }
    Ok(())
}

async fn tags(context: &Context, with_count: bool) -> Result<(), CliError> {
    let catalog = context.catalog();
    if with_count {
        println!("{}", output::tags_with_count(&catalog.tags_with_count().await?));
    } else {
        println!("{}", output::tags(&catalog.tags().await?));
    }
    Ok(())
}
