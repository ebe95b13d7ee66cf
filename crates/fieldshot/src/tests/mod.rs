mod config;
mod desktop;
mod support;
