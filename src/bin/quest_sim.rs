//! Replay bench: run a seeded chore session through the engine and
//! verify the run is reproducible.
//!
//! Usage: quest_sim
//! Config via env: SIM_SEED, SIM_TASKS, SIM_START_TS, SIM_MIN_GAP_MS,
//!                 SIM_MAX_GAP_MS, SIM_DUP_RATE, LOG_LEVEL, LOG_DOMAINS

use anyhow::{bail, Result};

use chorequest::logging::{log, obj, v_num, v_str, v_u64, Domain, Level};
use chorequest::sim::{run, SimConfig};

fn main() -> Result<()> {
    let cfg = SimConfig::from_env();

    log(
        Level::Info,
        Domain::System,
        "sim.start",
        obj(&[
            ("seed", v_u64(cfg.seed)),
            ("tasks", v_u64(cfg.task_count as u64)),
            ("dup_rate", v_num(cfg.duplicate_rate)),
        ]),
    );

    let first = run(&cfg);
    let second = run(&cfg);

    log(
        Level::Info,
        Domain::Sim,
        "sim.report",
        obj(&[
            ("events", v_u64(first.events)),
            ("noops", v_u64(first.noops)),
            ("done", v_u64(first.done as u64)),
            ("remaining", v_u64(first.remaining as u64)),
            ("level_ups", v_u64(first.level_ups)),
            ("total_xp", v_u64(first.total_xp)),
            ("max_combo", v_u64(first.max_combo as u64)),
            ("final_level", v_u64(first.final_level as u64)),
            ("final_xp", v_u64(first.final_xp)),
            (
                "achievements",
                serde_json::json!(first.achievements),
            ),
            ("state_hash", v_str(&format!("{:016x}", first.final_hash))),
        ]),
    );

    if first.final_hash != second.final_hash {
        log(
            Level::Error,
            Domain::Sim,
            "sim.replay_mismatch",
            obj(&[
                ("first", v_str(&format!("{:016x}", first.final_hash))),
                ("second", v_str(&format!("{:016x}", second.final_hash))),
            ]),
        );
        bail!("replay mismatch: engine is not deterministic for this seed");
    }

    log(
        Level::Info,
        Domain::Sim,
        "sim.replay_ok",
        obj(&[("state_hash", v_str(&format!("{:016x}", first.final_hash)))]),
    );

    Ok(())
}
