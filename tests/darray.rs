use std::{
    cmp::Ordering,
    rc::Rc,
    sync::{
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
        Arc,
    },
};

use darray::{
    last_error::{self, RecordError},
    prelude::*,
};

#[derive(Debug, Clone, PartialEq)]
struct Student {
    id:    u32,
    name:  String,
    grade: f32,
}

fn student(id: u32, name: &str, grade: f32) -> Box<Student> {
    Box::new(Student { id, name: name.to_string(), grade })
}

fn by_id(a: &Box<Student>, b: &Box<Student>) -> Ordering {
    a.id.cmp(&b.id)
}

#[test]
fn scenario_pop_insert_reverse_sort() {
    let mut arr = DArray::new(None).unwrap();
    for i in 0..5 {
        arr.append(i).unwrap();
    }
    arr.pop(0).unwrap();
    arr.pop(2).unwrap();
    arr.insert(0, -1).unwrap();
    arr.reverse();
    assert_eq!(arr, [4, 2, 1, -1]);
    arr.sort(i32::cmp);
    assert_eq!(arr, [-1, 1, 2, 4]);
}

#[test]
fn owned_records_with_destroyer() {
    let destroyed = Arc::new(AtomicUsize::new(0));
    let counter = destroyed.clone();
    let destroyer = Destroyer::new(move |_: Box<Student>| {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
    });

    let mut students = DArray::new(Some(destroyer)).unwrap();
    students.append(student(3, "carol", 7.5)).unwrap();
    students.append(student(1, "alice", 8.0)).unwrap();
    students.append(student(2, "bob", 6.5)).unwrap();
    students.append(student(2, "bob", 6.5)).unwrap();

    students.sort(by_id);
    students.unique(by_id);
    assert_eq!(students.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(destroyed.load(AtomicOrdering::Relaxed), 1);

    let mut total = 0.0;
    students.aggregate(&mut total, |s, total| *total += s.grade);
    assert_eq!(total, 22.0);

    let idx = students.search(&2, |s: &Box<Student>, id: &u32| s.id.cmp(id)).unwrap();
    assert_eq!(students.get(idx).map(|s| s.name.as_str()), Ok("bob"));

    students.foreach(|s| s.grade += 1.0);
    assert_eq!(students[0].grade, 9.0);

    let copy = students.try_clone().unwrap();
    assert_eq!(copy, students);
    drop(copy);
    assert_eq!(destroyed.load(AtomicOrdering::Relaxed), 4);

    students.destroy();
    assert_eq!(destroyed.load(AtomicOrdering::Relaxed), 7);
}

#[test]
fn view_over_borrowed_items() {
    let names = ["delta", "alpha", "charlie", "bravo"];
    let mut view = DArray::new(None).unwrap();
    for name in &names {
        view.append(name).unwrap();
    }
    view.sort(|a, b| a.cmp(b));
    assert_eq!(view, [&"alpha", &"bravo", &"charlie", &"delta"]);

    view.pop_range(0, 2).unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(names.len(), 4);
}

#[test]
fn clone_shares_or_copies_items() {
    let mut arr = DArray::new(None).unwrap();
    for i in 0..3 {
        arr.append(Rc::new(i)).unwrap();
    }

    let shared = arr.clone_with(Rc::clone).unwrap();
    assert!(arr.iter().zip(&shared).all(|(a, b)| Rc::ptr_eq(a, b)));

    let deep = arr.clone_with(|item| Rc::new(**item)).unwrap();
    assert_eq!(deep, arr);
    assert!(arr.iter().zip(&deep).all(|(a, b)| !Rc::ptr_eq(a, b)));
}

#[test]
fn extend_leaves_source_untouched() {
    let mut arr = DArray::new(None).unwrap();
    let mut other = DArray::new(None).unwrap();
    for i in 0..3 {
        arr.append(i).unwrap();
        other.append(i + 10).unwrap();
    }

    arr.extend(&other).unwrap();
    assert_eq!(arr, [0, 1, 2, 10, 11, 12]);
    assert_eq!(other, [10, 11, 12]);

    arr.extend_at_owned(0, &mut other).unwrap();
    assert_eq!(arr, [10, 11, 12, 0, 1, 2, 10, 11, 12]);
    assert!(other.is_empty());
}

#[test]
fn empty_array_errors() {
    let mut arr = DArray::<i32>::new(None).unwrap();
    assert_eq!(arr.pop(0), Err(DArrayError::InvalidIndex));
    assert_eq!(arr.get(0), Err(DArrayError::InvalidIndex));
    assert_eq!(arr.pop_range(0, 0), Ok(()));
    assert_eq!(arr.search(&1, i32::cmp), Err(DArrayError::NotFound));
}

#[test]
fn two_step_error_reporting() {
    let mut arr = DArray::<i32>::new(None).unwrap();
    last_error::errno();

    assert!(arr.pop(4).record().is_none());
    assert_eq!(last_error::strerr(), "index out of range");
    assert_eq!(last_error::strerr(), "no error");

    assert!(arr.append(1).record().is_some());
    assert_eq!(last_error::errno(), None);

    assert!(arr.search(&7, i32::cmp).record().is_none());
    assert_eq!(last_error::errno(), Some(DArrayError::NotFound));
    assert_eq!(last_error::errno(), None);

    let missing: Option<Destroyer<i32>> = None;
    assert_eq!(last_error::require(missing).err(), Some(DArrayError::InvalidArgument));
}

#[test]
fn storage_budget_reports_allocation_failure() {
    last_error::errno();
    let storage = TrackingStorage::with_limit(64);
    let mut arr = DArray::<u64, _>::new_in(None, storage.clone()).unwrap();

    let mut appended = 0;
    while arr.append(appended).is_ok() {
        appended += 1;
    }
    assert_eq!(appended, 8);
    assert_eq!(arr.len(), 8);
    assert_eq!(last_error::errno(), None);
    assert_eq!(arr.append(8).record(), None);
    assert_eq!(last_error::strerr(), "memory allocation failed");

    drop(arr);
    let stats = storage.stats();
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(stats.peak_bytes, 64);
}
