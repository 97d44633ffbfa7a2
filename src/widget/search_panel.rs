//! Location search box with place suggestions

use crate::domain::{Place, place};
use crate::session::messages::SearchMsg;

#[derive(Debug, Default)]
pub struct SearchPanel {
    query: String,
    suggestions: Vec<&'static Place>,
}

impl SearchPanel {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Places matching the current query; empty while the query is empty
    pub fn suggestions(&self) -> &[&'static Place] {
        &self.suggestions
    }

    /// Returns the place the user picked, if any
    pub fn update(&mut self, msg: SearchMsg) -> Option<&'static Place> {
        match msg {
            SearchMsg::Query(query) => {
                self.set_query(query);
                None
            }
            SearchMsg::Choose(index) => {
                let Some(chosen) = self.suggestions.get(index).copied() else {
                    log::warn!("No suggestion at index {}", index);
                    return None;
                };
                self.set_query(chosen.name.to_string());
                Some(chosen)
            }
        }
    }

    fn set_query(&mut self, query: String) {
        self.suggestions = if query.is_empty() {
            Vec::new()
        } else {
            place::search(&query)
        };
        self.query = query;
    }
}
