use web_url::WebUrl;

#[track_caller]
fn parse(input: &str) -> WebUrl {
    WebUrl::parse(input).unwrap()
}

#[test]
fn compose_query_with_components() {
    let base = parse("http://host/");
    let url = base
        .new_builder()
        .add_query_parameter("a+=& b", Some("c+=& d"))
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?a%2B%3D%26%20b=c%2B%3D%26%20d");
    assert_eq!(url.query_parameter_value(0).as_deref(), Some("c+=& d"));
    assert_eq!(url.query_parameter_name(0), "a+=& b");
    assert_eq!(url.query_parameter("a+=& b").as_deref(), Some("c+=& d"));
    assert_eq!(url.query_parameter_names(), ["a+=& b"]);
    assert_eq!(
        url.query_parameter_values("a+=& b"),
        [Some("c+=& d".into())]
    );
    assert_eq!(url.query_size(), 1);
    // Ambiguous but working as designed: the decoded join reintroduces
    // the metacharacters.
    assert_eq!(url.query().as_deref(), Some("a+=& b=c+=& d"));
    assert_eq!(
        url.encoded_query().as_deref(),
        Some("a%2B%3D%26%20b=c%2B%3D%26%20d")
    );
}

#[test]
fn compose_query_with_encoded_components() {
    let base = parse("http://host/");
    let url = base
        .new_builder()
        .add_encoded_query_parameter("a+=& b", Some("c+=& d"))
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?a+%3D%26%20b=c+%3D%26%20d");
    assert_eq!(url.query_parameter("a =& b").as_deref(), Some("c =& d"));
}

#[test]
fn compose_query_remove_query_parameter() {
    let url = parse("http://host/")
        .new_builder()
        .add_query_parameter("a+=& b", Some("c+=& d"))
        .remove_all_query_parameters("a+=& b")
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/");
    assert_eq!(url.query_parameter("a+=& b"), None);
}

#[test]
fn compose_query_remove_encoded_query_parameter() {
    let url = parse("http://host/")
        .new_builder()
        .add_encoded_query_parameter("a+=& b", Some("c+=& d"))
        .remove_all_encoded_query_parameters("a+=& b")
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/");
    assert_eq!(url.query_parameter("a =& b"), None);
}

#[test]
fn compose_query_set_query_parameter() {
    let url = parse("http://host/")
        .new_builder()
        .add_query_parameter("a+=& b", Some("c+=& d"))
        .set_query_parameter("a+=& b", Some("ef"))
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?a%2B%3D%26%20b=ef");
    assert_eq!(url.query_parameter("a+=& b").as_deref(), Some("ef"));
}

#[test]
fn compose_query_set_encoded_query_parameter() {
    let url = parse("http://host/")
        .new_builder()
        .add_encoded_query_parameter("a+=& b", Some("c+=& d"))
        .set_encoded_query_parameter("a+=& b", Some("ef"))
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?a+%3D%26%20b=ef");
    assert_eq!(url.query_parameter("a =& b").as_deref(), Some("ef"));
}

#[test]
fn compose_query_multiple_values_for_parameter() {
    let url = parse("http://host/")
        .new_builder()
        .add_query_parameter("a+=& b", Some("c+=& d"))
        .add_query_parameter("a+=& b", Some("e+=& f"))
        .build()
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://host/?a%2B%3D%26%20b=c%2B%3D%26%20d&a%2B%3D%26%20b=e%2B%3D%26%20f"
    );
    assert_eq!(url.query_size(), 2);
    assert_eq!(url.query_parameter_names(), ["a+=& b"]);
    assert_eq!(
        url.query_parameter_values("a+=& b"),
        [Some("c+=& d".into()), Some("e+=& f".into())]
    );
}

#[test]
fn absent_query_is_zero_name_value_pairs() {
    let url = parse("http://host/").new_builder().query(None).build().unwrap();
    assert_eq!(url.query_size(), 0);
}

#[test]
fn empty_query_is_single_name_value_pair_with_empty_key() {
    let url = parse("http://host/").new_builder().query(Some("")).build().unwrap();
    assert_eq!(url.query_size(), 1);
    assert_eq!(url.query_parameter_name(0), "");
    assert_eq!(url.query_parameter_value(0), None);
}

#[test]
fn ampersand_query_is_two_name_value_pairs_with_empty_keys() {
    let url = parse("http://host/").new_builder().query(Some("&")).build().unwrap();
    assert_eq!(url.query_size(), 2);
    assert_eq!(url.query_parameter_name(0), "");
    assert_eq!(url.query_parameter_value(0), None);
    assert_eq!(url.query_parameter_name(1), "");
    assert_eq!(url.query_parameter_value(1), None);
}

#[test]
fn remove_all_keeps_the_query_if_nothing_was_removed() {
    let url = parse("http://host/")
        .new_builder()
        .query(Some(""))
        .remove_all_query_parameters("a")
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?");
}

#[test]
fn query_parameters_without_values() {
    let url = parse("http://host/?foo&bar&baz");
    assert_eq!(url.query_size(), 3);
    assert_eq!(url.query_parameter_names(), ["foo", "bar", "baz"]);
    assert_eq!(url.query_parameter_value(0), None);
    assert_eq!(url.query_parameter_value(1), None);
    assert_eq!(url.query_parameter_value(2), None);
    assert_eq!(url.query_parameter_values("foo"), [None]);
    assert_eq!(url.query_parameter_values("bar"), [None]);
    assert_eq!(url.query_parameter_values("baz"), [None]);
}

#[test]
fn query_parameters_with_empty_values() {
    let url = parse("http://host/?foo=&bar=&baz=");
    assert_eq!(url.query_size(), 3);
    assert_eq!(url.query_parameter_names(), ["foo", "bar", "baz"]);
    assert_eq!(url.query_parameter_value(0).as_deref(), Some(""));
    assert_eq!(url.query_parameter_value(1).as_deref(), Some(""));
    assert_eq!(url.query_parameter_value(2).as_deref(), Some(""));
    assert_eq!(url.query_parameter_values("foo"), [Some("".into())]);
}

#[test]
fn query_parameters_with_repeated_name() {
    let url = parse("http://host/?foo[]=1&foo[]=2&foo[]=3");
    assert_eq!(url.query_size(), 3);
    assert_eq!(url.query_parameter_names(), ["foo[]"]);
    assert_eq!(url.query_parameter_value(0).as_deref(), Some("1"));
    assert_eq!(url.query_parameter_value(1).as_deref(), Some("2"));
    assert_eq!(url.query_parameter_value(2).as_deref(), Some("3"));
    assert_eq!(
        url.query_parameter_values("foo[]"),
        [Some("1".into()), Some("2".into()), Some("3".into())]
    );
}

/// Parameter lookup compares decoded names, so `%6d` aliases `m` and `+`
/// aliases space.
#[test]
fn query_parameter_lookup_with_non_canonical_encoding() {
    let url = parse("http://host/?%6d=m&+=%20");
    assert_eq!(url.query_parameter_name(0), "m");
    assert_eq!(url.query_parameter_name(1), " ");
    assert_eq!(url.query_parameter("m").as_deref(), Some("m"));
    assert_eq!(url.query_parameter(" ").as_deref(), Some(" "));
}

#[test]
fn query_characters_encoded_when_composed() {
    let url = parse("http://host/")
        .new_builder()
        .add_query_parameter("a", Some("!$(),/:;?@[]\\^`{|}~"))
        .build()
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://host/?a=%21%24%28%29%2C%2F%3A%3B%3F%40%5B%5D%5C%5E%60%7B%7C%7D%7E"
    );
    assert_eq!(
        url.query_parameter("a").as_deref(),
        Some("!$(),/:;?@[]\\^`{|}~")
    );
}

/// With the encoded variants only what is strictly required gets encoded;
/// the input's encoded-or-not choices survive.
#[test]
fn query_characters_not_reencoded_when_composed_with_add_encoded() {
    let url = parse("http://host/")
        .new_builder()
        .add_encoded_query_parameter("a", Some("!$(),/:;?@[]\\^`{|}~"))
        .build()
        .unwrap();
    assert_eq!(url.as_str(), "http://host/?a=!$(),/:;?@[]\\^`{|}~");
    assert_eq!(
        url.query_parameter("a").as_deref(),
        Some("!$(),/:;?@[]\\^`{|}~")
    );
}
