//! `member!` forms that must expand and type-check.

use autovalidator::member;
use autovalidator::member::MemberSelector;

struct Address {
    city: String,
}

struct Person {
    name: String,
    r#type: u8,
    age: i32,
    address: Address,
}

struct Pair(u8, String);

struct Boxed {
    name: Box<String>,
}

fn main() {
    let person = Person {
        name: "Jon".to_string(),
        r#type: 1,
        age: 30,
        address: Address {
            city: "Oslo".to_string(),
        },
    };

    let (id, read) = member!(|m: Person| m.name).resolve().unwrap();
    assert_eq!(id.name(), "name");
    assert_eq!(read(&person), "Jon");

    let (id, read) = member!(|m: &Person| m.r#type).resolve().unwrap();
    assert_eq!(id.name(), "type");
    assert_eq!(*read(&person), 1);

    let (id, read) = member!(|m: Person| (*m).age as i64).resolve().unwrap();
    assert_eq!(id.name(), "age");
    assert_eq!(*read(&person), 30);

    let (_, read) = member!(|m: Person| (&m.address)).resolve().unwrap();
    assert_eq!(read(&person).city, "Oslo");

    let (id, read) = member!(|p: Pair| p.1).resolve().unwrap();
    assert_eq!(id.name(), "1");
    assert_eq!(read(&Pair(0, "x".to_string())), "x");

    let boxed = Boxed {
        name: Box::new("Ada".to_string()),
    };
    let (id, read) = member!(|m: Boxed| *m.name).resolve().unwrap();
    assert_eq!(id.name(), "name");
    let name: &String = read(&boxed);
    assert_eq!(name, "Ada");

    assert!(member!(|m: Person| m.address.city).resolve().is_err());

    let computed: MemberSelector<Person, usize> = member!(|m: Person| m.name.len());
    assert!(computed.resolve().is_err());
}
