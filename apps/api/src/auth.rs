mod cookie;
mod session;

pub use cookie::{SESSION_COOKIE, clear_session_cookie, extract_session_cookie, session_cookie};
pub use session::{
    check_session_handler, create_session_handler, logout_handler, me_handler,
};
