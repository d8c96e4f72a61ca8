/// Integer variables which can be turned into views with a scale or an offset.
pub trait TransformableVariable<View> {
    /// Get a variable which domain is scaled compared to the domain of self.
    ///
    /// The scaled domain contains `scale * x` for every `x` in the domain of self.
    fn scaled(&self, scale: i32) -> View;

    /// Get a variable which domain has a constant offset to the domain of self.
    fn offset(&self, offset: i32) -> View;
}
