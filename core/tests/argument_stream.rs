//! Writer and reader used together, the way wire records drive them.

use libibus_core::{Argument, ArgumentReader, ArgumentWriter, Attachment, Signature, WireError};

fn write_list() -> Argument {
    let mut w = ArgumentWriter::new();
    w.begin_structure();
    w.write_str("IBusAttrList").unwrap();
    w.begin_map(Signature::string(), Signature::variant());
    w.end_map().unwrap();
    w.begin_array(Signature::variant());
    for start in [0u32, 4] {
        let mut inner = ArgumentWriter::new();
        inner.begin_structure();
        inner.write_u32(start).unwrap();
        inner.write_u32(start + 2).unwrap();
        inner.end_structure().unwrap();
        w.write_variant(inner.finish().unwrap()).unwrap();
    }
    w.end_array().unwrap();
    w.end_structure().unwrap();
    w.finish().unwrap()
}

#[test]
fn test_variant_array_roundtrip() {
    let arg = write_list();
    assert_eq!(arg.signature(), "(sa{sv}av)");

    let mut r = ArgumentReader::new(&arg);
    r.begin_structure().unwrap();
    assert_eq!(r.read_str().unwrap(), "IBusAttrList");
    r.begin_map().unwrap();
    assert!(r.at_end());
    r.end_map().unwrap();

    let mut ranges = Vec::new();
    r.begin_array().unwrap();
    assert_eq!(r.current_signature(), "vv");
    while !r.at_end() {
        let inner = r.read_variant().unwrap();
        let mut nested = r.descend(inner);
        nested.begin_structure().unwrap();
        let start = nested.read_u32().unwrap();
        let end = nested.read_u32().unwrap();
        nested.end_structure().unwrap();
        ranges.push((start, end));
    }
    r.end_array().unwrap();
    r.end_structure().unwrap();

    assert_eq!(ranges, vec![(0, 2), (4, 6)]);
}

#[test]
fn test_map_entry_signature_and_attachment() {
    let mut w = ArgumentWriter::new();
    w.begin_map(Signature::string(), Signature::variant());
    w.begin_map_entry().unwrap();
    w.write_str("k").unwrap();
    w.write_variant(Argument::I32(-5)).unwrap();
    w.end_map_entry().unwrap();
    w.end_map().unwrap();
    let arg = w.finish().unwrap();

    let mut r = ArgumentReader::new(&arg);
    r.begin_map().unwrap();
    assert_eq!(r.current_signature(), "{sv}");
    r.begin_map_entry().unwrap();
    assert_eq!(r.current_signature(), "sv");
    r.read_str().unwrap();
    let value = r.read_variant().unwrap();
    r.end_map_entry().unwrap();
    r.end_map().unwrap();

    let att = Attachment::from_argument(value).unwrap();
    assert_eq!(att.decode().unwrap(), Argument::I32(-5));
}

#[test]
fn test_reading_beyond_map_entries_fails() {
    let arg = Argument::Dict {
        key: Signature::string(),
        value: Signature::variant(),
        entries: Vec::new(),
    };
    let mut r = ArgumentReader::new(&arg);
    r.begin_map().unwrap();
    assert!(matches!(
        r.begin_map_entry(),
        Err(WireError::UnexpectedEnd { frame: "map", .. })
    ));
}
