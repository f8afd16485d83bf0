mod fixtures;
mod test_buffer;
mod test_cli;
mod test_config;
