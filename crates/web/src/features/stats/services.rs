use sqlx::PgPool;
use storage::{
    dto::{profile::ProfileFilter, stats::StatsReport},
    error::Result,
    repository::profile::ProfileRepository,
    services::report,
};

/// Summarize every stored submission
pub async fn get_stats(pool: &PgPool) -> Result<StatsReport> {
    let repo = ProfileRepository::new(pool);
    let records = repo.list(&ProfileFilter::default()).await?;

    Ok(report::summarize(&records))
}
