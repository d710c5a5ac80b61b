use chrono::{DateTime, Days};
use chrono_tz::Tz;

/// Registry entry backing `list_jobs`.
#[derive(Debug, Clone)]
pub(super) struct JobMetadata {
    pub job_id: String,
    pub display_name: String,
    pub hour: u32,
    pub minute: u32,
}

/// Introspection view of one installed job.
#[derive(Debug, Clone)]
pub struct JobInfo {
    pub id: String,
    pub name: String,
    pub next_run_time: DateTime<Tz>,
}

/// Next daily trigger strictly after `now`. Pure over the supplied now so
/// tests need no wall clock.
pub(super) fn next_fire_after(now: DateTime<Tz>, hour: u32, minute: u32) -> DateTime<Tz> {
    let hour = hour.min(23);
    let minute = minute.min(59);

    let mut date = now.date_naive();
    loop {
        // earliest() resolves the rare ambiguous local time
        if let Some(candidate) = date
            .and_hms_opt(hour, minute, 0)
            .and_then(|dt| dt.and_local_timezone(now.timezone()).earliest())
        {
            if candidate > now {
                return candidate;
            }
        }
        date = date
            .checked_add_days(Days::new(1))
            .expect("date overflow computing next trigger");
    }
}
