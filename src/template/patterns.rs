use crate::{
    model::node::{BLACK, WHITE},
    template::model::Template,
};

/// Black-to-white horizontal sweep over a `width` x `height` raster.
///
/// At context `t` every row holds `width - t` black pixels followed by `t`
/// white ones, so sweeping `t` over `0..=width` animates a wipe. Contexts
/// outside that range fail to evaluate.
pub fn horizontal_wipe(width: u16, height: u16) -> Template<i64> {
    let width = i64::from(width);
    Template::repeat(
        height,
        vec![
            Template::repeat_with(move |t: i64| width - t, vec![Template::from(BLACK)]),
            Template::repeat_with(|t: i64| t, vec![Template::from(WHITE)]),
        ],
    )
}
