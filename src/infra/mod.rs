//! Collaborators supplied by the environment the task runs in.

pub mod credentials;
