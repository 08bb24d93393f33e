//! The process-wide localizer. Kept to a single test since all tests in a
//! binary share it.

use parlance::{t, Keywords, LocalizationConfig, Localizer, Placeholders};
use pretty_assertions::assert_eq;

#[test]
fn global_localizer_round() {
    let l = Localizer::global();
    l.reset();
    l.extend(
        "en",
        Keywords::new()
            .with("title", "Inbox")
            .with("unread", ":count unread for :name"),
    );
    l.extend("ar", Keywords::new().with("title", "الوارد"));

    assert_eq!(t!("title"), "Inbox");
    assert_eq!(t!("unread", { count: 3, name: "Sam" }), "3 unread for Sam");
    assert_eq!(parlance::trans("missing", None), "missing");

    l.configure(LocalizationConfig::new().with_default_locale("ar"))
        .unwrap();
    assert_eq!(parlance::trans("title", None), "الوارد");
    assert_eq!(parlance::trans_from("en", "title", None), "Inbox");

    l.set_converter(|text: &str, _: &Placeholders, _: &parlance::PlaceholderPattern| {
        text.to_uppercase()
    });
    let p = Placeholders::new().with("count", 1).with("name", "Sam");
    assert_eq!(parlance::trans_from("en", "unread", Some(&p)), ":COUNT UNREAD FOR :NAME");
    assert_eq!(parlance::plain_trans("unread", Some(&p)), "1 unread for Sam");

    l.reset();
    assert_eq!(t!("title"), "title");
}
