//! Transient page state, reset on every page load.

use shared::protocol::{Recommendation, Skill, User, UserSnapshot};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageState {
    pub current_user: Option<User>,
    pub skills: Vec<Skill>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateDelta {
    UserData(UserSnapshot),
}

impl PageState {
    pub fn apply(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::UserData(snapshot) => {
                self.current_user = snapshot.user;
                self.skills = snapshot.skills;
                self.recommendations = snapshot.recommendations;
            }
        }
    }
}
