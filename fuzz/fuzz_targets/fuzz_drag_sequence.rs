#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use arbitrary::Arbitrary;
use dnd_core::event::{PointerButton, PointerEvent};
use dnd_core::geometry::{ElementBox, Point};
use dnd_runtime::{DragCoordinator, DraggableItem, ManualFrameClock};
use dnd_widgets::{Draggable, DropTarget};
use libfuzzer_sys::fuzz_target;

const SLOTS: u8 = 8;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { slot: u8, button: u8, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Up,
    ReleaseOver { slot: u8, disabled: bool },
    Frame,
    Interrupt,
    Reregister { shift: u8 },
}

fuzz_target!(|ops: Vec<Op>| {
    let clock = ManualFrameClock::new();
    let coordinator = DragCoordinator::new(clock.clone());
    let drops = Rc::new(Cell::new(0usize));

    let register = |shift: u8| {
        coordinator.set_items((0..SLOTS / 2).map(|i| {
            let drops = Rc::clone(&drops);
            DraggableItem::new((i64::from(i) + i64::from(shift)) % i64::from(SLOTS), move |_| {
                drops.set(drops.get() + 1);
            })
        }));
    };
    register(0);

    let items: Vec<Draggable> = (0..SLOTS)
        .map(|slot| {
            let item = Draggable::new(&coordinator.drag_context(), i64::from(slot));
            item.element()
                .attach(Rc::new(ElementBox::new(f64::from(slot) * 10.0, 0.0, 10.0, 10.0)));
            item
        })
        .collect();
    let targets: Vec<DropTarget> = (0..SLOTS)
        .map(|slot| DropTarget::new(&coordinator.drop_context(), i64::from(slot)))
        .collect();

    for op in ops.into_iter().take(256) {
        let drops_before = drops.get();
        let was_dragging = coordinator.is_dragging();
        match op {
            Op::Down { slot, button, x, y } => {
                let event =
                    PointerEvent::down(PointerButton::from_index(button), f64::from(x), f64::from(y));
                items[usize::from(slot % SLOTS)].on_pointer_down(&event);
            }
            Op::Move { x, y } => {
                coordinator.handle_pointer_move(&PointerEvent::moved(f64::from(x), f64::from(y)));
            }
            Op::Up => {
                coordinator.handle_pointer_up(&PointerEvent::up(PointerButton::Left, 0.0, 0.0));
            }
            Op::ReleaseOver { slot, disabled } => {
                let target = targets[usize::from(slot % SLOTS)].clone().disabled(disabled);
                target.on_pointer_up(&PointerEvent::up(PointerButton::Left, 0.0, 0.0));
                if disabled || !was_dragging {
                    assert_eq!(drops.get(), drops_before, "drop resolved without a valid release");
                }
            }
            Op::Frame => {
                clock.tick_now();
            }
            Op::Interrupt => {
                coordinator.interrupt();
            }
            Op::Reregister { shift } => register(shift),
        }

        assert!(drops.get() <= drops_before + 1, "more than one drop callback per input");
        assert_eq!(clock.pending(), usize::from(coordinator.is_dragging()));
        if !coordinator.is_dragging() {
            assert_eq!(coordinator.pointer(), Point::ORIGIN);
        }
        let active: Vec<&Draggable> = items.iter().filter(|i| i.is_active()).collect();
        assert!(active.len() <= 1, "more than one active item");
        if let Some(item) = active.first() {
            assert_eq!(Some(item.assigned().clone()), coordinator.snapshot().active);
        }
    }
});
