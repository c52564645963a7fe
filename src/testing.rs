//! Scripted in-process stand-in for the remote secrets API.
//!
//! Each expected call is registered as a [`Fixture`] in order. The fixture
//! backend checks the request it receives against the expectation, replays
//! the canned response, and records every call for later assertions.
//!
//! ```
//! use secret_acl_core::testing::{Fixture, FixtureApi};
//! use secret_acl_core::{AclItem, GetAclRequest, SecretsApi};
//!
//! let api = FixtureApi::new(vec![Fixture::get(AclItem::new("something", "MANAGE"))]);
//! let item = api
//!     .get_acl(&GetAclRequest { scope: "global".into(), principal: "something".into() })
//!     .unwrap();
//! assert_eq!(item.permission, "MANAGE");
//! api.assert_exhausted();
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::SecretsApi;
use crate::error::{AclError, ApiError, Result};
use crate::types::{AclItem, DeleteAcl, GetAclRequest, PutAcl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Put(PutAcl),
    Get(GetAclRequest),
    Delete(DeleteAcl),
}

impl RecordedCall {
    fn operation(&self) -> &'static str {
        match self {
            Self::Put(_) => "put_acl",
            Self::Get(_) => "get_acl",
            Self::Delete(_) => "delete_acl",
        }
    }
}

#[derive(Debug, Clone)]
enum Expect {
    Put(Option<PutAcl>),
    Get(Option<GetAclRequest>),
    Delete(Option<DeleteAcl>),
}

#[derive(Debug, Clone)]
enum Reply {
    Done,
    Item(AclItem),
    Fail(ApiError),
}

/// One expected remote call and its canned outcome.
#[derive(Debug, Clone)]
pub struct Fixture {
    expect: Expect,
    reply: Reply,
}

impl Fixture {
    #[must_use]
    pub fn put() -> Self {
        Self {
            expect: Expect::Put(None),
            reply: Reply::Done,
        }
    }

    #[must_use]
    pub fn get(item: AclItem) -> Self {
        Self {
            expect: Expect::Get(None),
            reply: Reply::Item(item),
        }
    }

    #[must_use]
    pub fn get_failing(error: ApiError) -> Self {
        Self {
            expect: Expect::Get(None),
            reply: Reply::Fail(error),
        }
    }

    #[must_use]
    pub fn delete() -> Self {
        Self {
            expect: Expect::Delete(None),
            reply: Reply::Done,
        }
    }

    /// Replaces the reply with a remote failure.
    #[must_use]
    pub fn failing(mut self, error: ApiError) -> Self {
        self.reply = Reply::Fail(error);
        self
    }

    #[must_use]
    pub fn expect_put(mut self, request: PutAcl) -> Self {
        self.expect = Expect::Put(Some(request));
        self
    }

    #[must_use]
    pub fn expect_get(mut self, request: GetAclRequest) -> Self {
        self.expect = Expect::Get(Some(request));
        self
    }

    #[must_use]
    pub fn expect_delete(mut self, request: DeleteAcl) -> Self {
        self.expect = Expect::Delete(Some(request));
        self
    }

    fn check(&self, call: &RecordedCall) -> std::result::Result<(), String> {
        let matches = match (&self.expect, call) {
            (Expect::Put(want), RecordedCall::Put(got)) => want.as_ref().is_none_or(|w| w == got),
            (Expect::Get(want), RecordedCall::Get(got)) => want.as_ref().is_none_or(|w| w == got),
            (Expect::Delete(want), RecordedCall::Delete(got)) => {
                want.as_ref().is_none_or(|w| w == got)
            }
            _ => false,
        };
        if matches {
            Ok(())
        } else {
            Err(format!("expected {:?}, got {call:?}", self.expect))
        }
    }
}

#[derive(Debug, Default)]
struct FixtureState {
    pending: VecDeque<Fixture>,
    calls: Vec<RecordedCall>,
}

#[derive(Debug, Default)]
pub struct FixtureApi {
    state: Mutex<FixtureState>,
}

impl FixtureApi {
    #[must_use]
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self {
            state: Mutex::new(FixtureState {
                pending: fixtures.into(),
                calls: Vec::new(),
            }),
        }
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Panics when registered fixtures were never consumed.
    pub fn assert_exhausted(&self) {
        let state = self.lock();
        assert!(
            state.pending.is_empty(),
            "{} fixture(s) not used: {:?}",
            state.pending.len(),
            state.pending
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        // A panicking test poisons the lock; the recorded state is still usable.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn answer(&self, call: RecordedCall) -> Result<Reply> {
        let mut state = self.lock();
        let operation = call.operation();
        state.calls.push(call.clone());
        let fixture = state.pending.pop_front().ok_or_else(|| {
            AclError::Transport(format!("no fixture registered for {operation}: {call:?}"))
        })?;
        fixture
            .check(&call)
            .map_err(|reason| AclError::Transport(format!("fixture mismatch: {reason}")))?;
        match fixture.reply {
            Reply::Fail(error) => Err(error.into()),
            reply => Ok(reply),
        }
    }
}

impl SecretsApi for FixtureApi {
    fn put_acl(&self, request: &PutAcl) -> Result<()> {
        self.answer(RecordedCall::Put(request.clone())).map(drop)
    }

    fn get_acl(&self, request: &GetAclRequest) -> Result<AclItem> {
        match self.answer(RecordedCall::Get(request.clone()))? {
            Reply::Item(item) => Ok(item),
            _ => Err(AclError::Transport(
                "get_acl fixture has no item to return".to_string(),
            )),
        }
    }

    fn delete_acl(&self, request: &DeleteAcl) -> Result<()> {
        self.answer(RecordedCall::Delete(request.clone())).map(drop)
    }
}
