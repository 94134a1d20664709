macro_rules! tuples {
    ($macro:ident) => {
        $macro!();
        $macro!(T0);
        $macro!(T0, T1);
        $macro!(T0, T1, T2);
        $macro!(T0, T1, T2, T3);
        $macro!(T0, T1, T2, T3, T4);
        $macro!(T0, T1, T2, T3, T4, T5);
        $macro!(T0, T1, T2, T3, T4, T5, T6);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
        $macro!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
    };
}

/// Builds an [`Attrs`](crate::Attrs) map from `key => value` pairs.
///
/// Values go through [`AttrValue::from`](crate::AttrValue), so strings, numbers, booleans,
/// handlers and style maps can be mixed freely.
///
/// ```
/// use sprout_core::{attrs, AttrValue};
///
/// let attrs = attrs! { "id" => "main", "tabindex" => 3, "hidden" => false };
/// assert_eq!(attrs.get("id"), Some(&AttrValue::from("main")));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attrs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::Attrs::new();
        $(attrs.insert($key, $value);)+
        attrs
    }};
}
