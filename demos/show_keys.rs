use std::error::Error;

use terminfo_keys::{Function, Key, Loader, SearchContext};

fn main() -> Result<(), Box<dyn Error>> {
    let context = SearchContext::from_env();
    let loader = Loader::default();
    let located = loader.locate(&context)?;
    println!("terminfo file: {}", located.path.display());

    let capabilities = loader.load(&context)?;
    for key in Key::ALL {
        println!(
            "{key:?} ({}) = {:?}",
            key.cap_name(),
            String::from_utf8_lossy(capabilities.key(key))
        );
    }
    for function in Function::ALL {
        println!(
            "{function:?} ({}) = {:?}",
            function.cap_name(),
            String::from_utf8_lossy(capabilities.function(function))
        );
    }

    Ok(())
}
