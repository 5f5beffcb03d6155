mod commands;
mod terminal;

use commands::{CommandLine, Commands, api, check, guide, system, ws};
use reachr_common::network::interface;
use reachr_core::tester::ReachabilityTester;
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging();

    let cfg = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    let tester = ReachabilityTester::new(cfg.clone())?;

    match commands.command() {
        Commands::Check => check::check(&tester, &cfg).await,
        Commands::Api => {
            api::public_ip(&tester, &cfg).await;
            api::api(&tester, &cfg).await;
        }
        Commands::Ws => ws::ws(&tester, &cfg).await,
        Commands::System => {
            system::system(&tester, &cfg).await;
        }
        Commands::Guide => {
            let ctx = tester.guide_context(interface::get_lan_ipv4());
            guide::guide(&ctx, cfg.quiet);
        }
    }

    mprint!();
    print::end_of_program();
    Ok(())
}
