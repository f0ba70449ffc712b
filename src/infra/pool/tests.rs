//! Message pool tests: exhaustion, reuse, and defensive release.
use super::*;
use crate::protocol::transport::can_id::CanId;

#[test]
/// Every slot can be claimed once; the next allocation reports exhaustion.
fn test_allocate_until_exhausted() {
    let pool: MessagePool<4> = MessagePool::new();
    let mut held = [None, None, None, None];
    for entry in held.iter_mut() {
        *entry = Some(pool.allocate().expect("slot available below capacity"));
    }
    assert_eq!(pool.in_use(), 4);
    assert!(pool.allocate().is_none());

    // Freeing one slot makes exactly that slot available again.
    let second = held[1].take().unwrap();
    assert_eq!(second.index(), 1);
    pool.release(second);
    let again = pool.allocate().expect("released slot must be reusable");
    assert_eq!(again.index(), 1);
}

#[test]
/// Interleaved allocate/release never exceeding capacity always succeeds.
fn test_churn_within_capacity() {
    let pool: MessagePool<3> = MessagePool::new();
    for _ in 0..50 {
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        pool.release(a);
        let c = pool.allocate().unwrap();
        pool.release(b);
        pool.release(c);
    }
    assert_eq!(pool.in_use(), 0);
}

#[test]
/// Releasing a reference from outside the pool leaves the used flags alone.
fn test_release_foreign_reference_is_noop() {
    let pool: MessagePool<2> = MessagePool::new();
    let a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();

    pool.release(SlotRef::new(pool.id(), 7));
    pool.release(SlotRef::new(pool.id(), 200));
    assert_eq!(pool.in_use(), 2);
    assert!(pool.allocate().is_none());

    pool.release(a);
    pool.release(b);
    assert_eq!(pool.in_use(), 0);
}

#[test]
/// A reference handed out by another pool never frees a slot of this one.
fn test_release_reference_from_other_pool_is_noop() {
    let first: MessagePool<4> = MessagePool::new();
    let second: MessagePool<4> = MessagePool::new();
    let from_first = first.allocate().unwrap();
    let from_second = second.allocate().unwrap();
    assert_eq!(from_first.index(), from_second.index());

    let frame = CanFrame::extended(CanId(0x1000_0006), &[0xFF; 8]);
    second.write(&from_second, &frame);
    first.write(&from_second, &CanFrame::EMPTY);
    assert_eq!(second.read(&from_first), CanFrame::EMPTY);

    second.release(from_first);
    assert_eq!(second.in_use(), 1);
    assert_eq!(second.allocate().unwrap().index(), 1);
    assert_eq!(second.read(&from_second), frame);
    assert_eq!(first.in_use(), 1);
}

#[test]
/// A second release of an already free slot does not disturb other slots.
fn test_double_release_is_harmless() {
    let pool: MessagePool<3> = MessagePool::new();
    let a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();
    let index = a.index() as u8;
    pool.release(a);
    pool.release(SlotRef::new(pool.id(), index));
    assert_eq!(pool.in_use(), 1);
    pool.release(b);
    assert_eq!(pool.in_use(), 0);
}

#[test]
/// Frames written into a slot are returned by `take`, which frees the slot.
fn test_write_read_take() {
    let pool: MessagePool<2> = MessagePool::new();
    let frame = CanFrame::extended(CanId(0x1000_0002), &[1, 5, 2]);
    let slot = pool.allocate_with(&frame).unwrap();
    assert_eq!(pool.read(&slot), frame);

    let other = CanFrame::extended(CanId(0x1000_0005), &[0; 8]);
    pool.write(&slot, &other);
    assert_eq!(pool.take(slot), other);
    assert_eq!(pool.in_use(), 0);
}
