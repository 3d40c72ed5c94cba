//! Scope guards for temporary collidability changes.
//!
//! Both guards restore the previous value when dropped, so early returns and
//! unwinding leave bodies and actors as they were.

use std::ops::{Deref, DerefMut};

use super::Actor;

/// Overrides a collidability flag until dropped.
pub struct Suspended<'a> {
  flag: &'a mut bool,
  previous: bool,
}

impl<'a> Suspended<'a> {
  pub fn new(flag: &'a mut bool, value: bool) -> Self {
    let previous = std::mem::replace(flag, value);
    Self { flag, previous }
  }
}

impl Drop for Suspended<'_> {
  fn drop(&mut self) {
    *self.flag = self.previous;
  }
}

/// Keeps an actor collidable while a solid resolves it.
pub struct ForcedCollidable<'a, A: Actor + ?Sized> {
  actor: &'a mut A,
  previous: bool,
}

impl<'a, A: Actor + ?Sized> ForcedCollidable<'a, A> {
  pub fn new(actor: &'a mut A) -> Self {
    let previous = actor.is_collidable();
    actor.set_collidable(true);
    Self { actor, previous }
  }
}

impl<A: Actor + ?Sized> Deref for ForcedCollidable<'_, A> {
  type Target = A;

  fn deref(&self) -> &A {
    self.actor
  }
}

impl<A: Actor + ?Sized> DerefMut for ForcedCollidable<'_, A> {
  fn deref_mut(&mut self) -> &mut A {
    self.actor
  }
}

impl<A: Actor + ?Sized> Drop for ForcedCollidable<'_, A> {
  fn drop(&mut self) {
    self.actor.set_collidable(self.previous);
  }
}
