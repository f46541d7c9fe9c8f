use crate::{
    agents::{self, Player},
    command::SessionArg,
    config::AgentConfig,
    session, util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) session: SessionArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let SessionArg {
        total,
        block,
        play,
        evil,
        summary,
    } = &arg.session;
    let mut player_config = AgentConfig::player(play)?;
    player_config.notify("alpha=0")?;
    if let Some(path) = player_config.save.take() {
        log::warn!("not saving weights to {} while playing", path.display());
    }
    let environment_config = AgentConfig::environment(evil)?;

    let mut player = Player::from_config(&player_config)?;
    let mut environment = agents::build_environment(&environment_config)?;

    log::info!(
        "playing {} ({}) against {} for {total} episodes",
        player_config.name,
        player_config.policy,
        environment_config.name
    );
    let result = session::run_episodes(player.as_agent_mut(), &mut environment, *total, *block);
    if let Some(path) = summary {
        util::save_json(&result, path)?;
    }
    Ok(())
}
