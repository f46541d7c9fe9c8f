use crate::{
    agents::{self, Player},
    command::SessionArg,
    config::AgentConfig,
    session, util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    pub(crate) session: SessionArg,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let SessionArg {
        total,
        block,
        play,
        evil,
        summary,
    } = &arg.session;
    let player_config = AgentConfig::player(play)?;
    let environment_config = AgentConfig::environment(evil)?;
    for key in player_config.extra_keys() {
        log::warn!(
            "{}: ignoring {key}={}",
            player_config.name,
            player_config.property(key)?
        );
    }

    let mut player = Player::from_config(&player_config)?;
    let mut environment = agents::build_environment(&environment_config)?;
    if player.learner().is_some_and(|learner| learner.alpha() == 0.0) {
        log::warn!(
            "{} trains with alpha=0; its weights will not change",
            player_config.name
        );
    }

    log::info!(
        "training {} ({}) against {} for {total} episodes",
        player_config.name,
        player_config.policy,
        environment_config.name
    );
    let result = session::run_episodes(player.as_agent_mut(), &mut environment, *total, *block);

    agents::save_weights(&player_config, &player)?;
    if let Some(path) = summary {
        util::save_json(&result, path)?;
    }
    Ok(())
}
