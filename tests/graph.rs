extern crate orrery;
extern crate rand;

use orrery::prelude::*;

fn assert_child_slots(world: &World, parent: Entity) {
    for (i, &child) in world.children(parent).iter().enumerate() {
        assert_eq!(world.parent(child), Some(parent));
        assert_eq!(world.scene.child_index(child), Some(i));
    }
}

#[test]
pub fn hierachy() {
    let mut world = World::new();
    let e1 = world.create("e1");
    let e2 = world.create("e2");
    let e3 = world.create("e3");
    let e4 = world.create("e4");

    world.add_child(e3, e4);
    world.add_child(e1, e3);
    world.add_child(e1, e2);
    // e1 <- (e3 <- (e4), e2)

    assert!(world.scene.is_ancestor(e2, e1));
    assert!(world.scene.is_ancestor(e3, e1));
    assert!(world.scene.is_ancestor(e4, e1));
    assert!(world.scene.is_ancestor(e4, e3));

    assert!(!world.scene.is_ancestor(e1, e1));
    assert!(!world.scene.is_ancestor(e1, e2));
    assert!(!world.scene.is_ancestor(e1, e3));
    assert!(!world.scene.is_ancestor(e2, e4));

    assert!(!world.scene.is_leaf(e1));
    assert!(world.scene.is_leaf(e2));
    assert!(!world.scene.is_leaf(e3));
    assert!(world.scene.is_leaf(e4));

    assert_eq!(world.parent(e1), None);
    assert_eq!(world.scene.child_index(e1), None);
    assert_eq!(world.children(e1), &[e3, e2]);
    assert_child_slots(&world, e1);
    assert_child_slots(&world, e3);
}

#[test]
fn add_remove_child() {
    let mut world = World::new();
    let p = world.create("p");
    let c = world.create("c");

    world.add_child(p, c);
    assert_eq!(world.parent(c), Some(p));
    assert!(world.children(p).contains(&c));

    world.remove_child(p, c);
    assert_eq!(world.parent(c), None);
    assert_eq!(world.scene.child_index(c), None);
    assert!(!world.children(p).contains(&c));
}

#[test]
fn remove_child_swaps_last_into_slot() {
    let mut world = World::new();
    let p = world.create("p");

    let children: Vec<_> = (0..5).map(|_| world.create("")).collect();
    for &c in &children {
        world.add_child(p, c);
    }

    assert_eq!(world.children(p), &children[..]);
    assert_child_slots(&world, p);

    world.remove_child(p, children[1]);
    assert_eq!(
        world.children(p),
        &[children[0], children[4], children[2], children[3]]
    );
    assert_child_slots(&world, p);

    world.remove_child(p, children[3]);
    assert_eq!(world.children(p), &[children[0], children[4], children[2]]);
    assert_child_slots(&world, p);

    world.remove_child(p, children[0]);
    world.remove_child(p, children[4]);
    world.remove_child(p, children[2]);
    assert!(world.children(p).is_empty());
    assert!(world.scene.is_leaf(p));

    for &c in &children {
        assert_eq!(world.parent(c), None);
        assert_eq!(world.scene.child_index(c), None);
    }
}

#[test]
fn reparent() {
    let mut world = World::new();
    let p1 = world.create("p1");
    let p2 = world.create("p2");
    let s = world.create("s");
    let c = world.create("c");

    world.add_child(p1, s);
    world.add_child(p1, c);
    world.add_child(p2, c);

    assert_eq!(world.parent(c), Some(p2));
    assert_eq!(world.children(p1), &[s]);
    assert_eq!(world.children(p2), &[c]);
    assert_child_slots(&world, p1);
    assert_child_slots(&world, p2);

    // Attaching to the current parent does nothing.
    world.add_child(p2, c);
    assert_eq!(world.children(p2), &[c]);
}

#[test]
fn noop_on_invalid_input() {
    let mut world = World::new();
    let p = world.create("p");
    let c = world.create("c");
    let other = world.create("other");
    let logic = world.create_empty("logic");

    world.add_child(p, c);

    match world.try_remove_child(other, c) {
        Err(Error::NotChildOf { parent, child }) => {
            assert_eq!(parent, other);
            assert_eq!(child, c);
        }
        v => panic!("unexpected {:?}", v),
    }

    world.remove_child(other, c);
    assert_eq!(world.parent(c), Some(p));

    match world.try_add_child(p, logic) {
        Err(Error::NonNodeFound(ent)) => assert_eq!(ent, logic),
        v => panic!("unexpected {:?}", v),
    }

    world.add_child(logic, c);
    assert_eq!(world.parent(c), Some(p));
    assert!(world.children(logic).is_empty());

    world.delete(other);
    world.add_child(other, c);
    world.remove_child(other, c);
    assert_eq!(world.parent(c), Some(p));
    assert_child_slots(&world, p);
}

#[test]
fn rejects_cycles() {
    let mut world = World::new();
    let e1 = world.create("e1");
    let e2 = world.create("e2");
    let e3 = world.create("e3");

    world.add_child(e1, e2);
    world.add_child(e2, e3);

    match world.try_add_child(e1, e1) {
        Err(Error::CanNotAttachSelfAsParent) => {}
        v => panic!("unexpected {:?}", v),
    }

    match world.try_add_child(e3, e1) {
        Err(Error::CyclicRelationship { parent, child }) => {
            assert_eq!(parent, e3);
            assert_eq!(child, e1);
        }
        v => panic!("unexpected {:?}", v),
    }

    world.add_child(e3, e1);
    assert_eq!(world.parent(e1), None);
    assert!(world.children(e3).is_empty());
    assert_eq!(world.ancestors(e3).collect::<Vec<_>>(), [e2, e1]);
}

#[test]
fn roots() {
    let mut world = World::new();
    let r1 = world.create("r1");
    let r2 = world.create("r2");
    let c = world.create("c");
    world.add_child(r1, c);

    world.register_root(r2);
    world.register_root(r1);
    world.register_root(r2);
    assert_eq!(world.scene.roots(), &[r2, r1]);
    assert!(world.scene.is_root(r1));

    match world.try_register_root(c) {
        Err(Error::HasParent(ent)) => assert_eq!(ent, c),
        v => panic!("unexpected {:?}", v),
    }

    match world.try_add_child(r1, r2) {
        Err(Error::RootCanNotBeChild(ent)) => assert_eq!(ent, r2),
        v => panic!("unexpected {:?}", v),
    }

    assert!(world.unregister_root(r2));
    assert!(!world.unregister_root(r2));
    assert_eq!(world.scene.roots(), &[r1]);

    world.add_child(r1, r2);
    assert_eq!(world.parent(r2), Some(r1));
}

#[test]
fn iteration() {
    let mut world = World::new();
    let e1 = world.create("e1");
    let e2 = world.create("e2");
    let e3 = world.create("e3");
    let e4 = world.create("e4");
    let e5 = world.create("e5");
    let e6 = world.create("e6");

    // e1 <- (e2, e3 <- e4 <- (e5, e6))
    world.add_child(e1, e2);
    world.add_child(e1, e3);
    world.add_child(e3, e4);
    world.add_child(e4, e5);
    world.add_child(e4, e6);

    assert_eq!(
        world.descendants(e1).collect::<Vec<_>>(),
        [e2, e3, e4, e5, e6]
    );
    assert_eq!(world.descendants(e4).collect::<Vec<_>>(), [e5, e6]);
    assert_eq!(world.descendants(e6).count(), 0);

    assert_eq!(world.children(e1), &[e2, e3]);
    assert_eq!(world.ancestors(e1).count(), 0);
    assert_eq!(world.ancestors(e2).collect::<Vec<_>>(), [e1]);
    assert_eq!(world.ancestors(e4).collect::<Vec<_>>(), [e3, e1]);
    assert_eq!(world.ancestors(e6).collect::<Vec<_>>(), [e4, e3, e1]);
}

#[test]
fn random_iteration() {
    let mut world = World::new();

    let mut nodes = vec![];
    for _ in 0..255 {
        nodes.push(world.create(""));
    }

    let mut constructed = vec![];
    constructed.push(nodes.pop().unwrap());

    let mut count = 0;
    for i in 0..254 {
        let idx = rand::random::<usize>() % nodes.len();
        let pidx = rand::random::<usize>() % constructed.len();

        if pidx == 0 {
            count += 1;
        }

        world.add_child(constructed[pidx], nodes[idx]);

        let len = world.descendants(constructed[0]).count();
        assert_eq!(len, i + 1);

        constructed.push(nodes[idx]);
        nodes.remove(idx);
    }

    assert_eq!(world.children(constructed[0]).len(), count);
    assert_eq!(world.descendants(constructed[0]).count(), 254);

    // Shuffles the hierarchy around, the child slots must stay consistent.
    for _ in 0..512 {
        let c = constructed[1 + rand::random::<usize>() % 254];
        let p = constructed[rand::random::<usize>() % 255];
        world.add_child(p, c);
    }

    assert_eq!(world.descendants(constructed[0]).count(), 254);
    for &v in &constructed {
        assert_child_slots(&world, v);
    }
}

#[test]
fn delete() {
    let mut world = World::new();
    let e1 = world.create("e1");
    let e2 = world.create("e2");
    let e3 = world.create("e3");
    let e4 = world.create("e4");
    let e5 = world.create("e5");
    let e6 = world.create("e6");

    world.add_child(e1, e2);
    world.add_child(e1, e3);
    world.add_child(e3, e4);
    world.add_child(e3, e5);
    world.add_child(e5, e6);
    // e1 <- (e2, e3 <- (e4, e5 <- e6))

    assert_eq!(world.len(), 6);

    let deletions = world.delete(e3).unwrap();
    assert_eq!(deletions, [e3, e4, e5, e6]);
    assert!(world.contains(e1));
    assert!(world.contains(e2));
    assert!(!world.contains(e3));
    assert!(!world.contains(e4));
    assert!(!world.contains(e5));
    assert!(!world.contains(e6));
    assert_eq!(world.len(), 2);
    assert_eq!(world.scene.len(), 2);
    assert_eq!(world.children(e1), &[e2]);
    assert_child_slots(&world, e1);

    assert_eq!(world.delete(e3), None);

    // Recycled slots does not revive stale handles.
    let e7 = world.create("e7");
    assert_eq!(e7.index(), e3.index());
    assert!(world.contains(e7));
    assert!(!world.contains(e3));
    assert_eq!(world.parent(e3), None);
    assert!(!world.scene.contains(e3));
}

#[test]
fn remove_spatial() {
    let mut world = World::new();
    let e1 = world.create("e1");
    let e2 = world.create("e2");
    let e3 = world.create("e3");
    let e4 = world.create("e4");

    world.add_child(e1, e2);
    world.add_child(e2, e3);
    world.add_child(e3, e4);

    assert!(world.remove_spatial(e2));
    assert!(!world.remove_spatial(e2));
    assert!(world.contains(e2));
    assert!(!world.scene.contains(e2));

    assert!(world.children(e1).is_empty());
    assert_eq!(world.parent(e3), None);
    assert_eq!(world.scene.child_index(e3), None);
    assert_eq!(world.children(e3), &[e4]);

    world.add_spatial(e2, Transform::default()).unwrap();
    assert!(world.scene.contains(e2));
    assert_eq!(world.parent(e2), None);
    assert!(world.children(e2).is_empty());
}
