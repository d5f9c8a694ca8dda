mod outcomes;
mod profile;
mod reward_filter;
mod session;
