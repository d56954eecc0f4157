//! In-memory backend for unit tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::client::{ChecklistApi, ClientError};
use crate::models::{Checklist, ChecklistItem, LoginRequest, RegisterRequest};

/// Number of calls made per endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calls {
    pub login: usize,
    pub register: usize,
    pub list: usize,
    pub create: usize,
    pub delete_checklist: usize,
    pub add_item: usize,
    pub delete_item: usize,
    pub toggle_item: usize,
}

impl Calls {
    pub fn mutations(&self) -> usize {
        self.create + self.delete_checklist + self.add_item + self.delete_item + self.toggle_item
    }
}

#[derive(Default)]
struct State {
    checklists: Vec<Checklist>,
    calls: Calls,
    next_id: u64,
    fail_login: bool,
    fail_mutations: bool,
    fail_list: bool,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

fn rejected() -> ClientError {
    ClientError::Status {
        status: 500,
        message: "boom".to_string(),
    }
}

impl FakeApi {
    pub const TOKEN: &'static str = "fake-token";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fail_login(&self) {
        self.state.lock().unwrap().fail_login = true;
    }

    pub fn fail_mutations(&self) {
        self.state.lock().unwrap().fail_mutations = true;
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    /// Seed a checklist directly, bypassing the call counters
    pub fn seed(&self, name: &str, items: &[&str]) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id.to_string();
        let mut checklist = Checklist {
            id: id.clone(),
            name: name.to_string(),
            checklist_completion_status: false,
            items: None,
        };
        for item in items {
            state.next_id += 1;
            checklist.items.get_or_insert_with(Vec::new).push(ChecklistItem {
                id: state.next_id.to_string(),
                name: item.to_string(),
                item_completion_status: false,
            });
        }
        state.checklists.push(checklist);
        id
    }

    fn authorize(token: &str) -> Result<(), ClientError> {
        if token == Self::TOKEN {
            Ok(())
        } else {
            Err(ClientError::Status {
                status: 401,
                message: "unauthorized".to_string(),
            })
        }
    }

    fn mutate<F>(&self, token: &str, count: fn(&mut Calls), apply: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut State) -> Result<(), ClientError>,
    {
        let mut state = self.state.lock().unwrap();
        count(&mut state.calls);
        Self::authorize(token)?;
        if state.fail_mutations {
            return Err(rejected());
        }
        apply(&mut *state)
    }
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: 404,
        message: "not found".to_string(),
    }
}

#[async_trait]
impl ChecklistApi for FakeApi {
    async fn login(&self, _request: &LoginRequest) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.login += 1;
        if state.fail_login {
            return Err(ClientError::Status {
                status: 401,
                message: "bad credentials".to_string(),
            });
        }
        Ok(Self::TOKEN.to_string())
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.register += 1;
        if state.fail_mutations {
            return Err(rejected());
        }
        Ok(())
    }

    async fn list_checklists(&self, token: &str) -> Result<Vec<Checklist>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.list += 1;
        Self::authorize(token)?;
        if state.fail_list {
            return Err(rejected());
        }
        Ok(state.checklists.clone())
    }

    async fn create_checklist(&self, token: &str, name: &str) -> Result<(), ClientError> {
        self.mutate(token, |c| c.create += 1, |state| {
            state.next_id += 1;
            let id = state.next_id.to_string();
            state.checklists.push(Checklist {
                id,
                name: name.to_string(),
                checklist_completion_status: false,
                items: None,
            });
            Ok(())
        })
    }

    async fn delete_checklist(&self, token: &str, checklist_id: &str) -> Result<(), ClientError> {
        self.mutate(token, |c| c.delete_checklist += 1, |state| {
            let before = state.checklists.len();
            state.checklists.retain(|c| c.id != checklist_id);
            if state.checklists.len() == before {
                Err(not_found())
            } else {
                Ok(())
            }
        })
    }

    async fn add_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_name: &str,
    ) -> Result<(), ClientError> {
        self.mutate(token, |c| c.add_item += 1, |state| {
            state.next_id += 1;
            let id = state.next_id.to_string();
            let checklist = state
                .checklists
                .iter_mut()
                .find(|c| c.id == checklist_id)
                .ok_or_else(not_found)?;
            checklist.items.get_or_insert_with(Vec::new).push(ChecklistItem {
                id,
                name: item_name.to_string(),
                item_completion_status: false,
            });
            Ok(())
        })
    }

    async fn delete_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError> {
        self.mutate(token, |c| c.delete_item += 1, |state| {
            let items = state
                .checklists
                .iter_mut()
                .find(|c| c.id == checklist_id)
                .and_then(|c| c.items.as_mut())
                .ok_or_else(not_found)?;
            items.retain(|i| i.id != item_id);
            Ok(())
        })
    }

    async fn toggle_item(
        &self,
        token: &str,
        checklist_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError> {
        self.mutate(token, |c| c.toggle_item += 1, |state| {
            let item = state
                .checklists
                .iter_mut()
                .find(|c| c.id == checklist_id)
                .and_then(|c| c.items.as_mut())
                .and_then(|items| items.iter_mut().find(|i| i.id == item_id))
                .ok_or_else(not_found)?;
            item.item_completion_status = !item.item_completion_status;
            Ok(())
        })
    }
}
