//! Bundles the stylesheet tree into a single minified file that the app
//! references through the asset system.

use std::fs;
use std::path::Path;

use lightningcss::bundler::{Bundler, FileProvider};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions};

const CSS_ENTRY: &str = "assets/css/main.css";
const CSS_OUT: &str = "assets/dist/bundle.css";

fn main() {
    println!("cargo:rerun-if-changed=assets/css/");

    let provider = FileProvider::new();
    let mut bundler = Bundler::new(&provider, None, ParserOptions::default());

    // Follows the @import chain starting at main.css
    let mut stylesheet = bundler
        .bundle(Path::new(CSS_ENTRY))
        .expect("CSS bundling failed");
    stylesheet
        .minify(MinifyOptions::default())
        .expect("CSS minification failed");
    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .expect("CSS printing failed");

    fs::create_dir_all("assets/dist").expect("cannot create assets/dist");
    fs::write(CSS_OUT, output.code).expect("cannot write bundle.css");
}
