pub(crate) mod route_guard;
pub(crate) mod session;
