pub mod board;
pub mod item;

use backlog_domain::Priority;

pub(crate) fn parse_priority(value: &str) -> anyhow::Result<Priority> {
    Ok(value.parse::<Priority>()?)
}
