use wicket::http::mime::{self, guess_type};

#[test]
fn test_guess_known_extensions() {
    assert_eq!(guess_type("index.html"), mime::HTML);
    assert_eq!(guess_type("index.htm"), mime::HTML);
    assert_eq!(guess_type("/static/app.mjs"), mime::JS);
    assert_eq!(guess_type("/static/app.js"), mime::JS);
    assert_eq!(guess_type("data.json"), mime::JSON);
    assert_eq!(guess_type("photo.jpeg"), mime::JPG);
    assert_eq!(guess_type("photo.jpg"), mime::JPG);
    assert_eq!(guess_type("icon.svg"), "image/svg+xml");
    assert_eq!(guess_type("favicon.ico"), "image/x-icon");
}

#[test]
fn test_guess_is_case_insensitive() {
    assert_eq!(guess_type("README.TXT"), mime::TXT);
    assert_eq!(guess_type("Report.PDF"), mime::PDF);
}

#[test]
fn test_guess_unknown_falls_back_to_binary() {
    assert_eq!(guess_type("archive.tar.gz"), mime::BIN);
    assert_eq!(guess_type("Makefile"), mime::BIN);
    assert_eq!(guess_type(""), mime::BIN);
    assert_eq!(guess_type("/dir.d/"), mime::BIN);
}
