use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use wardrive_types::{
    AccessPointRecord, Observation, RoutePoint, SessionName, SessionSummary, format_date,
};

use crate::merge;

/// Session currently being read; becomes a [`SessionSummary`] when finished.
#[derive(Debug)]
struct OpenSession {
    name: SessionName,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    addresses: HashSet<String>,
}

impl OpenSession {
    fn new(name: SessionName) -> Self {
        Self {
            name,
            start: None,
            end: None,
            addresses: HashSet::new(),
        }
    }

    fn record(&mut self, obs: &Observation) {
        if let Some(ts) = obs.timestamp {
            if self.start.is_none_or(|start| ts < start) {
                self.start = Some(ts);
            }
            if self.end.is_none_or(|end| ts > end) {
                self.end = Some(ts);
            }
        }
        self.addresses.insert(obs.address.clone());
    }

    fn finish(self) -> SessionSummary {
        let duration_seconds = match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start)
                .num_microseconds()
                .map(|us| us as f64 / 1_000_000.0)
                .unwrap_or(0.0),
            _ => 0.0,
        };

        SessionSummary {
            date: format_date(self.start),
            name: self.name,
            start: self.start,
            end: self.end,
            address_count: self.addresses.len(),
            duration_seconds,
        }
    }
}

/// Run-wide aggregation state.
///
/// Owns the merged access point table, the finished session summaries and
/// every route point. One instance per run; access points and sessions keep
/// first-seen order.
#[derive(Debug, Default)]
pub struct Aggregator {
    access_points: Vec<AccessPointRecord>,
    by_address: HashMap<String, usize>,
    sessions: Vec<SessionSummary>,
    by_session: HashMap<SessionName, usize>,
    route_points: Vec<RoutePoint>,
    open: Option<OpenSession>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting a new session, dropping any unfinished one.
    pub fn begin_session(&mut self, name: SessionName) {
        if let Some(previous) = self.open.replace(OpenSession::new(name)) {
            log::debug!("Session {} was never finished; discarding it", previous.name);
        }
    }

    /// Fold one accepted observation into the run state.
    pub fn observe(&mut self, obs: Observation) {
        match self.open.as_ref().map(|open| open.name == obs.session) {
            Some(true) => {}
            Some(false) => {
                self.finish_session();
                self.begin_session(obs.session.clone());
            }
            None => self.begin_session(obs.session.clone()),
        }
        if let Some(open) = self.open.as_mut() {
            open.record(&obs);
        }

        if let Some(timestamp) = obs.timestamp {
            self.route_points.push(RoutePoint {
                timestamp,
                position: obs.position,
                session: obs.session.clone(),
            });
        }

        match self.by_address.get(&obs.address) {
            Some(&idx) => {
                merge::absorb(&mut self.access_points[idx], &obs);
            }
            None => {
                self.by_address
                    .insert(obs.address.clone(), self.access_points.len());
                self.access_points.push(merge::seed(&obs));
            }
        }
    }

    /// Finalize the open session.
    ///
    /// A session name seen before replaces the earlier summary in place.
    pub fn finish_session(&mut self) -> Option<&SessionSummary> {
        let summary = self.open.take()?.finish();

        let idx = match self.by_session.get(&summary.name) {
            Some(&idx) => {
                self.sessions[idx] = summary;
                idx
            }
            None => {
                let idx = self.sessions.len();
                self.by_session.insert(summary.name.clone(), idx);
                self.sessions.push(summary);
                idx
            }
        };

        self.sessions.get(idx)
    }

    /// Discard the open session without a summary (file-level failure).
    ///
    /// Observations already folded stay in the access point table.
    pub fn abandon_session(&mut self) -> Option<SessionName> {
        self.open.take().map(|open| open.name)
    }

    /// Distinct addresses seen so far in the open session.
    pub fn open_session_addresses(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.addresses.len())
    }

    pub fn access_points(&self) -> &[AccessPointRecord] {
        &self.access_points
    }

    pub fn access_point(&self, address: &str) -> Option<&AccessPointRecord> {
        self.by_address
            .get(address)
            .map(|&idx| &self.access_points[idx])
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    pub fn session(&self, name: &SessionName) -> Option<&SessionSummary> {
        self.by_session.get(name).map(|&idx| &self.sessions[idx])
    }

    /// Route points in arrival order.
    pub fn route_points(&self) -> &[RoutePoint] {
        &self.route_points
    }
}
