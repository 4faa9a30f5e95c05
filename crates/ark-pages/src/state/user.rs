//! Current user, sign-on and sign-up forms, and the user's sessions.

use std::rc::Rc;

use ark_core::reactive::Signal;

use super::context::StoreContext;
use super::resource::{Resource, ResourceState};
use super::trigger::Trigger;
use crate::api::models::{User, UserSessions};
use crate::api::{
	Ack, PasswordEncoder, SessionSource, SignOnOutcome, SignUpOutcome, UNEXPECTED_ERROR,
};
use crate::events::UserEvent;
use crate::router::PageAddress;
use crate::spawn::spawn_task;
use crate::{info_log, warn_log};

pub const SIGN_ON_FAILED: &str = "Sign on failed";
pub const SIGN_UP_FAILED: &str = "Sign up failed";

/// The logged-on user, `None` for anonymous visitors
pub struct CurrentUserState {
	pub current_user: Signal<Option<User>>,
	ctx: StoreContext,
}

impl CurrentUserState {
	/// Create the store and, if a session cookie exists, ask the server who
	/// it belongs to.
	pub fn new(ctx: &StoreContext, session: &dyn SessionSource) -> Rc<Self> {
		let state = Rc::new(Self {
			current_user: Signal::new(None),
			ctx: ctx.clone(),
		});

		if session.has_session() {
			state.load();
		}

		state
	}

	fn load(&self) {
		let api = self.ctx.api.clone();
		let current_user = self.current_user.clone();
		let user_events = self.ctx.events.user.clone();

		spawn_task(async move {
			match api.current_user().await {
				Ok(Some(user)) => {
					info_log!("logged on as {}", user.name);
					current_user.set(Some(user));
					user_events.send(&UserEvent::LoggedOn);
				}
				Ok(None) => current_user.set(None),
				Err(e) => warn_log!("failed to fetch the current user: {}", e),
			}
		});
	}

	pub fn is_logged_on(&self) -> bool {
		self.current_user.with(Option::is_some)
	}

	pub fn set_current_user(&self, user: Option<User>) {
		self.current_user.set(user);
	}

	/// End this session, or every session of the user
	pub fn logout(&self, remove_all_sessions: bool) {
		let api = self.ctx.api.clone();
		let current_user = self.current_user.clone();
		let ctx = self.ctx.clone();

		spawn_task(async move {
			match api.logout(remove_all_sessions).await {
				Ok(Ack::Ok) => {
					current_user.set(None);
					ctx.go_to(&PageAddress::root());
					ctx.events.user.send(&UserEvent::LoggedOff);
				}
				Ok(Ack::Rejected(body)) => warn_log!("logout rejected: {}", body),
				Err(e) => warn_log!("logout failed: {}", e),
			}
		});
	}
}

/// The sign-on dialog
pub struct LoginState {
	pub visible: Signal<bool>,
	pub login: Signal<String>,
	pub password: Signal<String>,
	/// Empty when there is nothing to report
	pub error: Signal<String>,
	current_user: Rc<CurrentUserState>,
	encoder: Rc<dyn PasswordEncoder>,
	ctx: StoreContext,
}

impl LoginState {
	pub fn new(
		ctx: &StoreContext,
		current_user: &Rc<CurrentUserState>,
		encoder: Rc<dyn PasswordEncoder>,
	) -> Rc<Self> {
		let state = Rc::new(Self {
			visible: Signal::new(false),
			login: Signal::new(String::new()),
			password: Signal::new(String::new()),
			error: Signal::new(String::new()),
			current_user: current_user.clone(),
			encoder,
			ctx: ctx.clone(),
		});

		// The sign-up page replaces the dialog
		let visible = state.visible.clone();
		ctx.address.subscribe(move |address| {
			if *address == PageAddress::Signup {
				visible.set_if_changed(false);
			}
		});

		state
	}

	/// Open or close the dialog; opening clears the password and the error
	pub fn toggle(&self) {
		let open = !self.visible.get_untracked();
		self.visible.set(open);
		if open {
			self.password.set(String::new());
			self.error.set(String::new());
		}
	}

	pub fn can_sign_on(&self) -> bool {
		!self.login.with(String::is_empty) && !self.password.with(String::is_empty)
	}

	pub fn sign_on(&self) {
		let api = self.ctx.api.clone();
		let user_name = self.login.get_untracked();
		let password = self.password.with_untracked(|p| self.encoder.encode(p));
		let error = self.error.clone();
		let visible = self.visible.clone();
		let current_user = self.current_user.clone();
		let user_events = self.ctx.events.user.clone();

		spawn_task(async move {
			match api.sign_on(&user_name, &password).await {
				Ok(SignOnOutcome::User(user)) => {
					error.set(String::new());
					visible.set(false);
					current_user.set_current_user(Some(user));
					user_events.send(&UserEvent::LoggedOn);
				}
				Ok(SignOnOutcome::Failed) => error.set(SIGN_ON_FAILED.to_string()),
				Err(e) => {
					warn_log!("sign on failed: {}", e);
					error.set(UNEXPECTED_ERROR.to_string());
				}
			}
		});
	}
}

/// The sign-up page form
pub struct SignupState {
	pub login: Signal<String>,
	pub password: Signal<String>,
	pub password_confirmation: Signal<String>,
	pub error: Signal<String>,
	encoder: Rc<dyn PasswordEncoder>,
	ctx: StoreContext,
}

impl SignupState {
	pub fn new(ctx: &StoreContext, encoder: Rc<dyn PasswordEncoder>) -> Rc<Self> {
		Rc::new(Self {
			login: Signal::new(String::new()),
			password: Signal::new(String::new()),
			password_confirmation: Signal::new(String::new()),
			error: Signal::new(String::new()),
			encoder,
			ctx: ctx.clone(),
		})
	}

	pub fn can_sign_up(&self) -> bool {
		let password = self.password.get();
		!self.login.with(String::is_empty)
			&& !password.is_empty()
			&& self.password_confirmation.with(|c| *c == password)
	}

	pub fn sign_up(&self) {
		let api = self.ctx.api.clone();
		let user_name = self.login.get_untracked();
		let password = self.password.with_untracked(|p| self.encoder.encode(p));
		let error = self.error.clone();
		let ctx = self.ctx.clone();

		spawn_task(async move {
			match api.sign_up(&user_name, &password).await {
				Ok(SignUpOutcome::Ok) => {
					error.set(String::new());
					ctx.go_to(&PageAddress::root());
				}
				Ok(SignUpOutcome::Failed) => error.set(SIGN_UP_FAILED.to_string()),
				Err(e) => {
					warn_log!("sign up failed: {}", e);
					error.set(UNEXPECTED_ERROR.to_string());
				}
			}
		});
	}
}

/// Sessions of the current user, shown on the profile page
pub struct UserSessionsState {
	pub sessions: Resource<UserSessions>,
	session: Rc<dyn SessionSource>,
	ctx: StoreContext,
}

impl UserSessionsState {
	pub fn new(ctx: &StoreContext, session: Rc<dyn SessionSource>) -> Rc<Self> {
		let state = Rc::new(Self {
			sessions: Resource::new("user_sessions", ResourceState::Success(UserSessions::default())),
			session,
			ctx: ctx.clone(),
		});

		Trigger::weak(&state, Self::refresh).on_address(&ctx.address);

		state
	}

	pub fn refresh(&self) {
		if self.ctx.current() != PageAddress::UserProfile {
			self.sessions.suspend();
			return;
		}

		let api = self.ctx.api.clone();
		self.sessions.load(async move { api.user_sessions().await });
	}

	/// Log `session` out; the list becomes what the server reports back
	pub fn remove_session(&self, session: &str) {
		let api = self.ctx.api.clone();
		let sessions = self.sessions.clone();
		let session = session.to_string();

		spawn_task(async move {
			match api.remove_user_session(&session).await {
				Ok(remaining) => sessions.set(ResourceState::Success(remaining)),
				Err(e) => warn_log!("failed to remove session {}: {}", session, e),
			}
		});
	}

	/// Whether `session` is the one this browser uses
	pub fn is_current(&self, session: &str) -> bool {
		self.session.session().as_deref() == Some(session)
	}

	pub fn can_logout_everywhere(&self) -> bool {
		self.sessions
			.with(|state| state.value().is_some_and(|s| s.sessions.len() > 1))
	}
}
