use std::rc::Rc;

use crate::observable::Observable;

/// A type-erased observable, created by
/// [`ObservableExt::boxed`](crate::observable::ObservableExt::boxed).
pub type BoxedObservable<Item> = Rc<dyn Observable<Item = Item>>;
