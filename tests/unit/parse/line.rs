use super::*;

#[test]
fn headers_are_classified() {
    assert_eq!(
        classify("[project]"),
        Ok(Line::Header(Header::Main(SectionRef::Project)))
    );
    assert_eq!(
        classify("[scene.2]"),
        Ok(Line::Header(Header::Main(SectionRef::Scene(SceneId(2)))))
    );
    assert_eq!(
        classify("[14]"),
        Ok(Line::Header(Header::Main(SectionRef::Object(ObjectId(14)))))
    );
    assert_eq!(
        classify("[14.3]"),
        Ok(Line::Header(Header::Effect(ObjectId(14), EffectId(3))))
    );
}

#[test]
fn odd_brackets_are_unrecognized() {
    for line in ["[foo]", "[1.2.3]", "[-1]", "[]", "[scene]", "[1.x]"] {
        assert_eq!(
            classify(line),
            Ok(Line::Header(Header::Unrecognized)),
            "{line}"
        );
    }
}

#[test]
fn bad_ids_are_fatal() {
    assert!(classify("[scene.x]").unwrap_err().contains("scene id"));
    assert!(classify("[scene.-3]").is_err());
    assert!(classify("[4294967296]").unwrap_err().contains("object id"));
    assert!(classify("[1.4294967296]").unwrap_err().contains("effect id"));
}

#[test]
fn assignment_splits_on_first_equals() {
    assert_eq!(
        classify("text = a=b"),
        Ok(Line::Assignment {
            key: "text",
            raw: " a=b"
        })
    );
    assert_eq!(classify(""), Ok(Line::Blank));
    assert_eq!(classify("orphan"), Ok(Line::Stray("orphan")));
}
