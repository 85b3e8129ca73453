/*
[INPUT]:  Event ids and pagination parameters
[OUTPUT]: Events, groups and member rosters
[POS]:    HTTP layer - event, group and member endpoints (require session cookie)
[UPDATE]: When adding event resources or changing pagination
*/

use reqwest::Method;

use crate::http::{EventdeskClient, Result};
use crate::types::{Event, Group, Member, Page};

impl EventdeskClient {
    /// List events, one page at a time
    ///
    /// GET /api/events?page={page}&pageSize={page_size}
    pub async fn list_events(&self, page: u32, page_size: u32) -> Result<Page<Event>> {
        let endpoint = format!("/api/events?page={page}&pageSize={page_size}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }

    /// GET /api/events/{event_id}
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        let endpoint = format!("/api/events/{event_id}");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }

    /// Groups of an event, each with its member list
    ///
    /// GET /api/events/{event_id}/groups
    pub async fn list_groups(&self, event_id: i64) -> Result<Vec<Group>> {
        let endpoint = format!("/api/events/{event_id}/groups");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }

    /// GET /api/events/{event_id}/members
    pub async fn list_members(&self, event_id: i64) -> Result<Vec<Member>> {
        let endpoint = format!("/api/events/{event_id}/members");
        let builder = self.request(Method::GET, &endpoint)?;
        self.send_envelope(builder).await
    }
}
