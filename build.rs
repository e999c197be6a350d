//! Build script for dupefind
//!
//! On Windows, embeds an application manifest with `longPathAware=true` so
//! that deep trees (paths over 260 characters) can be scanned. Other
//! platforms need nothing.

fn main() {
    #[cfg(windows)]
    {
        embed_resource::compile("dupefind.rc", embed_resource::NONE);

        println!("cargo:rerun-if-changed=dupefind.rc");
        println!("cargo:rerun-if-changed=dupefind.manifest");
    }
}
