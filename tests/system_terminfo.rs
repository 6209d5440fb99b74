use std::fs;

use terminfo_keys::{
    Capabilities, Key, Loader, Platform, SearchContext, SearchMode, locate::DEFAULT_DIR,
};

const SYSTEM_DIRS: &[&str] = &["/etc/terminfo", "/lib/terminfo", DEFAULT_DIR, "/usr/lib/terminfo"];

#[test]
fn test_all_terminals() {
    let loader = Loader::new(Platform::current()).with_mode(SearchMode::Minimal);
    for dir in SYSTEM_DIRS {
        let Ok(leaves) = fs::read_dir(dir) else {
            continue;
        };
        for leaf in leaves {
            let leaf = leaf.unwrap().path();
            let Ok(terms) = fs::read_dir(&leaf) else {
                continue;
            };
            for term in terms {
                let term = term.unwrap();
                let terminfo_buffer = fs::read(term.path()).unwrap();
                let capabilities = Capabilities::parse(&terminfo_buffer).unwrap();

                let context = SearchContext::new(term.file_name()).with_terminfo(*dir);
                assert_eq!(loader.load(&context).unwrap(), capabilities);

                println!("terminal: {:?}", term.file_name());
                for key in Key::ALL {
                    let value = capabilities.key(key);
                    if !value.is_empty() {
                        println!("\t{}={:?},", key.cap_name(), String::from_utf8_lossy(value));
                    }
                }
            }
        }
    }
}
