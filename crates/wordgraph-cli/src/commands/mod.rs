macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod dict_ops;
pub mod search_ops;

use std::path::Path;

use wordgraph_core::dict::Dawg;

/// Open a compiled dictionary or exit.
pub fn open_dict(file: &str) -> Dawg {
    die!(Dawg::open(Path::new(file)), "Error opening {file}: {}")
}
