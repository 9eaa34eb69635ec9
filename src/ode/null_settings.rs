use clap::Args;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct NullSettings {}
