/*
[INPUT]:  Parsed subcommands from main
[OUTPUT]: Command implementations
[POS]:    CLI layer - subcommand handlers
[UPDATE]: When adding subcommands
*/

pub mod commands;
pub mod init;
