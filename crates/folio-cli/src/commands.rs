use super::args::{BlogCommand, Cli, Commands, PortfolioCommand};
use super::context::AppContext;
use super::handlers;
use super::logging;
use anyhow::Result;
use folio_types::{Blog, Portfolio};

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);
    let ctx = AppContext::load(&cli)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(dispatch(&ctx, cli.command));
    // Stdin reads may still be parked on the blocking pool.
    runtime.shutdown_background();
    result
}

async fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { token } => handlers::auth::login(ctx, &token),
        Commands::Logout => handlers::auth::logout(ctx),
        Commands::Status => handlers::auth::status(ctx),
        Commands::Route { path } => handlers::auth::route(ctx, &path),

        Commands::Blog { command } => match command {
            BlogCommand::List(args) => handlers::records::list::<Blog>(ctx, args).await,
            BlogCommand::Show { id } => handlers::records::show::<Blog>(ctx, &id).await,
            BlogCommand::Delete(args) => handlers::records::delete::<Blog>(ctx, args).await,
            BlogCommand::Create(fields) => handlers::form::create_blog(ctx, fields).await,
            BlogCommand::Edit { id, fields } => handlers::form::edit_blog(ctx, &id, fields).await,
            BlogCommand::Generate { context } => handlers::generate::handle(ctx, context).await,
            BlogCommand::Browse => handlers::browse::handle::<Blog>(ctx).await,
        },

        Commands::Portfolio { command } => match command {
            PortfolioCommand::List(args) => handlers::records::list::<Portfolio>(ctx, args).await,
            PortfolioCommand::Show { id } => handlers::records::show::<Portfolio>(ctx, &id).await,
            PortfolioCommand::Delete(args) => {
                handlers::records::delete::<Portfolio>(ctx, args).await
            }
            PortfolioCommand::Create(fields) => {
                handlers::form::create_portfolio(ctx, fields).await
            }
            PortfolioCommand::Edit { id, fields } => {
                handlers::form::edit_portfolio(ctx, &id, fields).await
            }
            PortfolioCommand::Browse => handlers::browse::handle::<Portfolio>(ctx).await,
        },
    }
}
