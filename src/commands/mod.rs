pub type CmdResult<T> = regex_rename::Result<(T, i32)>;

pub mod rename;
