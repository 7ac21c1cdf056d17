//! "Best observation wins" merge policy for access point records.
//!
//! Signal strength decides which sighting describes the access point:
//! position and channel always follow the strongest sighting, vendor and
//! SSID follow it only when the stronger sighting actually carries one.
//! Equal signal strength never replaces the earlier sighting.

use chrono::NaiveDateTime;
use wardrive_types::{AccessPointRecord, Observation, QUOTED_EMPTY_SSID, UNKNOWN_VENDOR};

/// Start a record from the first sighting of an address.
pub fn seed(obs: &Observation) -> AccessPointRecord {
    AccessPointRecord {
        address: obs.address.clone(),
        best_signal_dbm: obs.signal_dbm,
        position: obs.position,
        channel: obs.channel,
        ssid: obs.ssid.clone(),
        security: obs.security.clone(),
        vendor: obs.vendor.clone(),
        count: 1,
        first_seen: obs.timestamp,
        last_seen: obs.timestamp,
        sessions: vec![obs.session.clone()],
    }
}

/// Fold a later sighting into an existing record.
///
/// Returns `true` when the sighting became the new best.
pub fn absorb(record: &mut AccessPointRecord, obs: &Observation) -> bool {
    record.count += 1;

    if !record.sessions.contains(&obs.session) {
        record.sessions.push(obs.session.clone());
    }

    widen_earliest(&mut record.first_seen, obs.timestamp);
    widen_latest(&mut record.last_seen, obs.timestamp);

    if obs.signal_dbm <= record.best_signal_dbm {
        return false;
    }

    record.best_signal_dbm = obs.signal_dbm;
    record.position = obs.position;
    record.channel = obs.channel;
    if obs.vendor != UNKNOWN_VENDOR {
        record.vendor = obs.vendor.clone();
    }
    if is_named_ssid(&obs.ssid) {
        record.ssid = obs.ssid.clone();
    }
    true
}

/// Empty and the literal `""` count as hidden; whitespace does not.
fn is_named_ssid(ssid: &str) -> bool {
    !ssid.is_empty() && ssid != QUOTED_EMPTY_SSID
}

fn widen_earliest(bound: &mut Option<NaiveDateTime>, ts: Option<NaiveDateTime>) {
    if let Some(ts) = ts
        && bound.is_none_or(|current| ts < current)
    {
        *bound = Some(ts);
    }
}

fn widen_latest(bound: &mut Option<NaiveDateTime>, ts: Option<NaiveDateTime>) {
    if let Some(ts) = ts
        && bound.is_none_or(|current| ts > current)
    {
        *bound = Some(ts);
    }
}
