use chrono::Utc;
use crossbeam::atomic::AtomicCell;

static LAST_ID: AtomicCell<i64> = AtomicCell::new(0);

/// Returns a new id based on the current time in milliseconds.
///
/// Ids are strictly increasing within the process, so two records created in
/// the same millisecond still get distinct ids.
pub fn time_based_id() -> String {
    let now = Utc::now().timestamp_millis();

    loop {
        let last = LAST_ID.load();
        let next = now.max(last + 1);

        if LAST_ID.compare_exchange(last, next).is_ok() {
            return next.to_string();
        }
    }
}
